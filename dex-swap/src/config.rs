use std::{fmt, time::Duration};

use alloy::primitives::{Address, U256};
use eyre::{eyre, WrapErr};

use crate::{
    amount::parse_amount,
    types::{Token, UNISWAP_V2_ROUTER_ADDRESS},
};

const DEFAULT_AMOUNT_IN: &str = "1";
const DEFAULT_AMOUNT_OUT_MIN: &str = "0.01";
const DEFAULT_DEADLINE_SECS: u64 = 20 * 60;

/// Everything one swap run needs, read from the environment.
#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub router: Address,
    pub token_in: Token,
    pub token_out: Token,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub deadline_after: Duration,
    pub dry_run: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("router", &self.router)
            .field("token_in", &self.token_in)
            .field("token_out", &self.token_out)
            .field("amount_in", &self.amount_in)
            .field("amount_out_min", &self.amount_out_min)
            .field("deadline_after", &self.deadline_after)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| var(key).ok_or_else(|| eyre!("{key} must be set"));

        let rpc_url = required("RPC_URL")?;
        let private_key = required("PRIVATE_KEY")?;

        let router = match var("ROUTER_ADDRESS") {
            Some(value) => parse_address("ROUTER_ADDRESS", &value)?,
            None => UNISWAP_V2_ROUTER_ADDRESS,
        };
        let token_in = token(&var, "TOKEN_IN", Token::dai())?;
        let token_out = token(&var, "TOKEN_OUT", Token::weth())?;

        let amount_in = var("AMOUNT_IN").unwrap_or_else(|| DEFAULT_AMOUNT_IN.to_string());
        let amount_in =
            parse_amount(&amount_in, token_in.decimals).wrap_err("invalid AMOUNT_IN")?;
        if amount_in.is_zero() {
            return Err(eyre!("AMOUNT_IN must be positive"));
        }

        let amount_out_min =
            var("AMOUNT_OUT_MIN").unwrap_or_else(|| DEFAULT_AMOUNT_OUT_MIN.to_string());
        let amount_out_min = parse_amount(&amount_out_min, token_out.decimals)
            .wrap_err("invalid AMOUNT_OUT_MIN")?;

        let deadline_secs = match var("DEADLINE_SECS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .wrap_err_with(|| format!("invalid DEADLINE_SECS {value:?}"))?,
            None => DEFAULT_DEADLINE_SECS,
        };

        let dry_run = match var("DRY_RUN") {
            Some(value) => parse_flag("DRY_RUN", &value)?,
            None => false,
        };

        Ok(Self {
            rpc_url,
            private_key,
            router,
            token_in,
            token_out,
            amount_in,
            amount_out_min,
            deadline_after: Duration::from_secs(deadline_secs),
            dry_run,
        })
    }
}

fn token<F>(var: &F, prefix: &str, default: Token) -> eyre::Result<Token>
where
    F: Fn(&str) -> Option<String>,
{
    let address_key = format!("{prefix}_ADDRESS");
    let address = match var(address_key.as_str()) {
        Some(value) => parse_address(&address_key, &value)?,
        None => default.address,
    };
    let symbol = var(format!("{prefix}_SYMBOL").as_str()).unwrap_or(default.symbol);
    let decimals_key = format!("{prefix}_DECIMALS");
    let decimals = match var(decimals_key.as_str()) {
        Some(value) => value
            .trim()
            .parse::<u8>()
            .wrap_err_with(|| format!("invalid {decimals_key} {value:?}"))?,
        None => default.decimals,
    };
    Ok(Token::new(address, symbol, decimals))
}

fn parse_address(key: &str, value: &str) -> eyre::Result<Address> {
    value
        .trim()
        .parse::<Address>()
        .wrap_err_with(|| format!("invalid {key} {value:?}"))
}

fn parse_flag(key: &str, value: &str) -> eyre::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(eyre!("invalid {key} {value:?}, expected true or false")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::{DAI_ADDRESS, WETH_ADDRESS};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("RPC_URL", "http://localhost:8545"),
        (
            "PRIVATE_KEY",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ),
    ];

    #[test]
    fn defaults_to_dai_weth_on_uniswap() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.router, UNISWAP_V2_ROUTER_ADDRESS);
        assert_eq!(config.token_in.address, DAI_ADDRESS);
        assert_eq!(config.token_out.address, WETH_ADDRESS);
        assert_eq!(config.amount_in, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(config.amount_out_min, U256::from(10_000_000_000_000_000u64));
        assert_eq!(config.deadline_after, Duration::from_secs(1200));
        assert!(!config.dry_run);
    }

    #[test]
    fn missing_required_vars() {
        let err = Config::from_lookup(lookup(&[REQUIRED[0]])).unwrap_err();
        assert_eq!(err.to_string(), "PRIVATE_KEY must be set");
        let err = Config::from_lookup(lookup(&[("RPC_URL", " "), REQUIRED[1]])).unwrap_err();
        assert_eq!(err.to_string(), "RPC_URL must be set");
    }

    #[test]
    fn overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("TOKEN_IN_ADDRESS", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
            ("TOKEN_IN_SYMBOL", "USDC"),
            ("TOKEN_IN_DECIMALS", "6"),
            ("AMOUNT_IN", "2.5"),
            ("AMOUNT_OUT_MIN", "0"),
            ("DEADLINE_SECS", "60"),
            ("DRY_RUN", "true"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.token_in.symbol, "USDC");
        assert_eq!(config.amount_in, U256::from(2_500_000u64));
        assert_eq!(config.amount_out_min, U256::ZERO);
        assert_eq!(config.deadline_after, Duration::from_secs(60));
        assert!(config.dry_run);
    }

    #[test]
    fn rejects_bad_values() {
        for bad in [
            ("ROUTER_ADDRESS", "0x1234"),
            ("AMOUNT_IN", "0"),
            ("AMOUNT_IN", "lots"),
            ("TOKEN_OUT_DECIMALS", "300"),
            ("DRY_RUN", "maybe"),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push(bad);
            assert!(Config::from_lookup(lookup(&vars)).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn debug_hides_private_key() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("ac0974bec"));
    }
}
