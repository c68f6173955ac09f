use std::{
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use alloy::{
    network::EthereumWallet,
    primitives::U256,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::BoxTransport,
};
use eyre::{eyre, WrapErr};
use tracing::info;

use crate::{adapters::uniswap_v2::UniswapV2Venue, config::Config};

/// Connects to `rpc_url` (http, ws or ipc) with a provider that fills and
/// signs transactions with `signer`.
pub async fn build_provider(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> eyre::Result<impl Provider<BoxTransport>> {
    let wallet = EthereumWallet::from(signer);
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_builtin(rpc_url)
        .await
        .wrap_err_with(|| format!("cannot connect to {rpc_url}"))?;

    Ok(provider)
}

pub async fn build_venue(
    config: &Config,
) -> eyre::Result<UniswapV2Venue<impl Provider<BoxTransport>>> {
    let signer = PrivateKeySigner::from_str(config.private_key.trim())
        .wrap_err("invalid PRIVATE_KEY")?;
    let account = signer.address();

    let provider = build_provider(&config.rpc_url, signer).await?;
    let chain_id = provider.get_chain_id().await?;
    info!(chain_id, %account, router = %config.router, "Connected");

    Ok(UniswapV2Venue::new(provider, config.router, account))
}

/// Absolute unix timestamp `after` from now, as the router expects it.
pub fn deadline_from_now(after: Duration) -> eyre::Result<U256> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .wrap_err("system clock is before the unix epoch")?;
    let deadline = now
        .checked_add(after)
        .ok_or_else(|| eyre!("DEADLINE_SECS overflows the clock"))?;
    Ok(U256::from(deadline.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_in_the_future() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let deadline = deadline_from_now(Duration::from_secs(1200)).unwrap();
        assert!(deadline >= U256::from(now + 1200));
        assert!(deadline <= U256::from(now + 1201));
    }

    #[test]
    fn deadline_overflow_is_an_error() {
        let err = deadline_from_now(Duration::from_secs(u64::MAX)).unwrap_err();
        assert_eq!(err.to_string(), "DEADLINE_SECS overflows the clock");
    }
}
