//! # Outcome AMM: Multi-Outcome Prediction Market Pricing
//!
//! A fixed-product market maker for prediction markets with 2 to 4
//! outcomes. It predicts, to the micro-unit, what the settlement contract
//! will pay for a trade.
//!
//! ## Overview
//!
//! - `amm` is the pricing engine: pure integer functions over a reserve
//!   snapshot (buy, sell, price impact, fees, slippage bounds).
//! - The program wraps the engine in read-only instructions that return a
//!   [`Quote`] for clients to simulate.
//!
//! Quotes are never authoritative. The settlement layer executes the trade
//! and enforces the quote's `minimum_out` against the real fill.

use anchor_lang::prelude::*;

pub mod amm;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;
pub use state::*;

// Replace with your deployed program ID
declare_id!("Hs5yWEZdocSbqypkQg61FgzJsLrkwR5c9KNFXBDeTfSv");

/// Main outcome AMM program
#[program]
pub mod outcome_amm {
    use super::*;

    /// Initialize the quoter with its fee configuration
    pub fn initialize(ctx: Context<Initialize>, fee_bps: u64) -> Result<()> {
        ctx.accounts.initialize(fee_bps, ctx.bumps)
    }

    /// Change the fee rate (admin only)
    pub fn update_fee(ctx: Context<UpdateConfig>, fee_bps: u64) -> Result<()> {
        ctx.accounts.update_fee(fee_bps)
    }

    /// Pause or resume quoting (admin only)
    pub fn set_paused(ctx: Context<UpdateConfig>, paused: bool) -> Result<()> {
        ctx.accounts.set_paused(paused)
    }

    /// Quote buying outcome shares with collateral
    pub fn get_buy_quote(
        ctx: Context<GetQuote>,
        market: MarketSnapshot,
        outcome: u8,
        amount_in: u64,
        tolerance_bps: u16,
    ) -> Result<Quote> {
        ctx.accounts
            .get_buy_quote(market, outcome, amount_in, tolerance_bps)
    }

    /// Quote selling outcome shares back to the pool
    pub fn get_sell_quote(
        ctx: Context<GetQuote>,
        market: MarketSnapshot,
        outcome: u8,
        shares_in: u64,
        tolerance_bps: u16,
    ) -> Result<Quote> {
        ctx.accounts
            .get_sell_quote(market, outcome, shares_in, tolerance_bps)
    }
}
