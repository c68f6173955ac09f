use alloy::primitives::{Address, U256};

use super::Confirmation;
use crate::types::{SwapOrder, SwapPath};

/// The remote side of a swap: a router that prices and executes swaps, and the
/// ERC-20 tokens it pulls from the signing account.
///
/// State changing calls resolve once the transaction is mined and fail if it
/// reverted. Remote errors are returned as produced by the client.
#[allow(async_fn_in_trait)]
pub trait SwapVenue {
    /// Address of the signing account; recipient of swaps and owner of approvals.
    fn account(&self) -> Address;

    /// Address allowed to pull input tokens, i.e. the router.
    fn spender(&self) -> Address;

    /// `getAmountsOut(amountIn, path)`.
    async fn amounts_out(&self, amount_in: U256, path: &SwapPath) -> eyre::Result<Vec<U256>>;

    /// `approve(spender, amount)` on `token`.
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<Confirmation>;

    /// `swapExactTokensForTokens(amountIn, amountOutMin, path, to, deadline)`.
    async fn swap_exact_tokens_for_tokens(&self, order: &SwapOrder) -> eyre::Result<Confirmation>;
}
