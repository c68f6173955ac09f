use alloy::primitives::{TxHash, U256};

pub mod uniswap_v2;
pub mod venue;

/// A mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

impl Confirmation {
    pub fn new(tx_hash: TxHash) -> Self {
        Self {
            tx_hash,
            block_number: None,
        }
    }
}

/// Router pricing for one swap, one amount per token in the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub amounts: Vec<U256>,
}

impl Quote {
    pub fn amount_in(&self) -> U256 {
        self.amounts.first().copied().unwrap_or_default()
    }

    pub fn amount_out(&self) -> U256 {
        self.amounts.last().copied().unwrap_or_default()
    }
}
