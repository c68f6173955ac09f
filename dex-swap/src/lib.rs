use std::io::Write;

use adapters::{venue::SwapVenue, Confirmation, Quote};
use alloy::primitives::{hex, U256};
use config::Config;
use eyre::bail;
use helpers::deadline_from_now;
use tracing::{info, warn};
use types::{SwapOrder, SwapPath, Token};

pub mod adapters;
pub mod amount;
pub mod config;
pub mod helpers;
pub mod types;

use amount::format_amount;

/// Amounts and timing of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub deadline: U256,
    pub dry_run: bool,
}

impl SwapPlan {
    /// Takes amounts from `config`, the deadline counts from now.
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Ok(Self {
            amount_in: config.amount_in,
            amount_out_min: config.amount_out_min,
            deadline: deadline_from_now(config.deadline_after)?,
            dry_run: config.dry_run,
        })
    }
}

/// A mined allowance for the router. Swapping requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approval {
    pub amount: U256,
    pub confirmation: Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    pub quote: Quote,
    pub approval: Option<Approval>,
    pub swap: Option<Confirmation>,
}

/// Sells `token_in` for `token_out` on a single venue.
pub struct Swapper<V: SwapVenue> {
    pub venue: V,
    pub token_in: Token,
    pub token_out: Token,
    pub path: SwapPath,
}

impl<V: SwapVenue> Swapper<V> {
    pub fn new(venue: V, token_in: Token, token_out: Token) -> eyre::Result<Self> {
        let path = SwapPath::new(vec![token_in.address, token_out.address])?;
        Ok(Self {
            venue,
            token_in,
            token_out,
            path,
        })
    }

    pub async fn quote(&self, amount_in: U256) -> eyre::Result<Quote> {
        if amount_in.is_zero() {
            bail!("cannot quote a zero amount");
        }
        let amounts = self.venue.amounts_out(amount_in, &self.path).await?;
        if amounts.len() != self.path.len() {
            bail!(
                "router returned {} amounts for a path of {} tokens",
                amounts.len(),
                self.path.len()
            );
        }
        let quote = Quote { amounts };
        info!(
            amount_in = %quote.amount_in(),
            amount_out = %quote.amount_out(),
            "Quoted"
        );
        Ok(quote)
    }

    pub async fn approve(&self, amount: U256) -> eyre::Result<Approval> {
        let spender = self.venue.spender();
        let confirmation = self
            .venue
            .approve(self.token_in.address, spender, amount)
            .await?;
        info!(
            token = %self.token_in.address,
            %spender,
            %amount,
            tx_hash = %confirmation.tx_hash,
            block_number = ?confirmation.block_number,
            "Approved"
        );
        Ok(Approval {
            amount,
            confirmation,
        })
    }

    pub async fn swap(
        &self,
        approval: &Approval,
        amount_in: U256,
        amount_out_min: U256,
        deadline: U256,
    ) -> eyre::Result<Confirmation> {
        if approval.amount < amount_in {
            bail!(
                "approved {} but swapping {}",
                approval.amount,
                amount_in
            );
        }
        let order = SwapOrder {
            amount_in,
            amount_out_min,
            path: self.path.clone(),
            recipient: self.venue.account(),
            deadline,
        };
        let confirmation = self.venue.swap_exact_tokens_for_tokens(&order).await?;
        info!(
            tx_hash = %confirmation.tx_hash,
            block_number = ?confirmation.block_number,
            "Swapped"
        );
        Ok(confirmation)
    }

    /// Quote, approve, swap, reporting each step on `out`. Stops at the first
    /// error.
    pub async fn run<W: Write>(&self, plan: &SwapPlan, out: &mut W) -> eyre::Result<SwapReport> {
        let quote = self.quote(plan.amount_in).await?;
        writeln!(
            out,
            "Expected {} amount for {} {}: {}",
            self.token_out.symbol,
            format_amount(plan.amount_in, self.token_in.decimals)?,
            self.token_in.symbol,
            format_amount(quote.amount_out(), self.token_out.decimals)?,
        )?;
        if quote.amount_out() < plan.amount_out_min {
            warn!(
                amount_out = %quote.amount_out(),
                amount_out_min = %plan.amount_out_min,
                "Quote is below the minimum output, the swap will likely revert"
            );
        }

        if plan.dry_run {
            info!("Dry run, no transaction submitted");
            return Ok(SwapReport {
                quote,
                approval: None,
                swap: None,
            });
        }

        let approval = self.approve(plan.amount_in).await?;
        writeln!(out, "{} approved for swapping.", self.token_in.symbol)?;

        writeln!(
            out,
            "Swapping {} for {}...",
            self.token_in.symbol, self.token_out.symbol
        )?;
        let swap = self
            .swap(&approval, plan.amount_in, plan.amount_out_min, plan.deadline)
            .await?;
        writeln!(out, "Transaction completed: {}", hex::encode_prefixed(swap.tx_hash))?;

        Ok(SwapReport {
            quote,
            approval: Some(approval),
            swap: Some(swap),
        })
    }
}
