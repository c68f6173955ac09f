use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionReceipt,
    sol,
    transports::BoxTransport,
};
use eyre::bail;
use tracing::debug;

use super::{venue::SwapVenue, Confirmation};
use crate::types::{SwapOrder, SwapPath};

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    interface IUniswapV2Router02 {
        function getAmountsOut(uint amountIn, address[] calldata path) external view returns (uint[] memory amounts);
        function swapExactTokensForTokens(uint amountIn, uint amountOutMin, address[] calldata path, address to, uint deadline) external returns (uint[] memory amounts);
    }
);

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
);

/// A Uniswap V2 router reached through an alloy provider that signs as `account`.
pub struct UniswapV2Venue<P> {
    router: IUniswapV2Router02::IUniswapV2Router02Instance<BoxTransport, P>,
    account: Address,
}

impl<P> UniswapV2Venue<P>
where
    P: Provider<BoxTransport>,
{
    pub fn new(provider: P, router: Address, account: Address) -> Self {
        let router = IUniswapV2Router02::new(router, provider);
        Self { router, account }
    }
}

impl<P> SwapVenue for UniswapV2Venue<P>
where
    P: Provider<BoxTransport>,
{
    fn account(&self) -> Address {
        self.account
    }

    fn spender(&self) -> Address {
        *self.router.address()
    }

    async fn amounts_out(&self, amount_in: U256, path: &SwapPath) -> eyre::Result<Vec<U256>> {
        let IUniswapV2Router02::getAmountsOutReturn { amounts } = self
            .router
            .getAmountsOut(amount_in, path.to_vec())
            .call()
            .await?;
        Ok(amounts)
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> eyre::Result<Confirmation> {
        let token = IERC20::new(token, self.router.provider());
        let pending = token
            .approve(spender, amount)
            .from(self.account)
            .send()
            .await?;
        debug!(tx_hash = %pending.tx_hash(), "Approval submitted");
        let receipt = pending.get_receipt().await?;
        confirmed(receipt, "approve")
    }

    async fn swap_exact_tokens_for_tokens(&self, order: &SwapOrder) -> eyre::Result<Confirmation> {
        let pending = self
            .router
            .swapExactTokensForTokens(
                order.amount_in,
                order.amount_out_min,
                order.path.to_vec(),
                order.recipient,
                order.deadline,
            )
            .from(self.account)
            .send()
            .await?;
        debug!(tx_hash = %pending.tx_hash(), "Swap submitted");
        let receipt = pending.get_receipt().await?;
        confirmed(receipt, "swapExactTokensForTokens")
    }
}

fn confirmed(receipt: TransactionReceipt, call: &str) -> eyre::Result<Confirmation> {
    if !receipt.status() {
        bail!("{call} transaction {} reverted", receipt.transaction_hash);
    }
    Ok(Confirmation {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
    })
}
