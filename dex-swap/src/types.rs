use alloy::primitives::{address, Address, U256};
use eyre::bail;

pub static UNISWAP_V2_ROUTER_ADDRESS: Address = address!("7a250d5630b4cf539739df2c5dacb4c659f2488d");
pub static DAI_ADDRESS: Address = address!("6b175474e89094c44da98b954eedeac495271d0f");
pub static WETH_ADDRESS: Address = address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn dai() -> Self {
        Self::new(DAI_ADDRESS, "DAI", 18)
    }

    pub fn weth() -> Self {
        Self::new(WETH_ADDRESS, "WETH", 18)
    }
}

/// Ordered token addresses a swap is routed through, input token first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPath(Vec<Address>);

impl SwapPath {
    pub fn new(tokens: Vec<Address>) -> eyre::Result<Self> {
        if tokens.len() < 2 {
            bail!("swap path needs at least two tokens, got {}", tokens.len());
        }
        if tokens.iter().any(|token| token.is_zero()) {
            bail!("swap path contains the zero address");
        }
        if tokens.windows(2).any(|hop| hop[0] == hop[1]) {
            bail!("swap path hops from a token to itself");
        }
        Ok(Self(tokens))
    }

    pub fn token_in(&self) -> Address {
        self.0[0]
    }

    pub fn token_out(&self) -> Address {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_vec(&self) -> Vec<Address> {
        self.0.clone()
    }
}

/// Arguments of `swapExactTokensForTokens`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOrder {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: SwapPath,
    pub recipient: Address,
    /// Unix timestamp in seconds.
    pub deadline: U256,
}
