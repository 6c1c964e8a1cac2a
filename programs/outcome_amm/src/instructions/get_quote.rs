//! Read-only Quoting
//!
//! Prices a trade against a market snapshot and hands the quote back as
//! return data. Nothing is written: the settlement layer executes the trade
//! and enforces `minimum_out` against the real fill.

use anchor_lang::prelude::*;

use crate::amm::{quote_buy, quote_sell, Quote, SlippageTolerance, TradeSide, PRICE_SCALE};
use crate::state::{Config, MarketSnapshot};

/// Event emitted for every quote served
#[event]
pub struct QuoteIssued {
    pub market_id: u64,
    pub side: TradeSide,
    pub outcome: u8,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee: u64,
    pub minimum_out: u64,
}

/// Accounts for quoting
#[derive(Accounts)]
pub struct GetQuote<'info> {
    /// Global configuration (fee rate, pause flag)
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> GetQuote<'info> {
    /// Quote buying `outcome` with `amount_in` collateral
    pub fn get_buy_quote(
        &self,
        market: MarketSnapshot,
        outcome: u8,
        amount_in: u64,
        tolerance_bps: u16,
    ) -> Result<Quote> {
        let quote = build_quote(
            &self.config,
            &market,
            TradeSide::Buy,
            outcome,
            amount_in,
            tolerance_bps,
        )?;
        log_quote(&market, &quote);
        Ok(quote)
    }

    /// Quote selling `shares_in` shares of `outcome`
    pub fn get_sell_quote(
        &self,
        market: MarketSnapshot,
        outcome: u8,
        shares_in: u64,
        tolerance_bps: u16,
    ) -> Result<Quote> {
        let quote = build_quote(
            &self.config,
            &market,
            TradeSide::Sell,
            outcome,
            shares_in,
            tolerance_bps,
        )?;
        log_quote(&market, &quote);
        Ok(quote)
    }
}

/// Gate on configuration and market status, price, then attach the
/// slippage bound.
pub fn build_quote(
    config: &Config,
    market: &MarketSnapshot,
    side: TradeSide,
    outcome: u8,
    amount: u64,
    tolerance_bps: u16,
) -> Result<Quote> {
    require!(!config.paused, QuoteError::ProtocolPaused);
    require!(market.is_open(), QuoteError::MarketNotOpen);

    let fees = config.fee_model()?;
    let tolerance = SlippageTolerance::from_bps(tolerance_bps)?;

    let quote = match side {
        TradeSide::Buy => quote_buy(&market.reserves, outcome, amount, fees)?,
        TradeSide::Sell => quote_sell(&market.reserves, outcome, amount, fees)?,
    };

    Ok(quote.with_slippage(tolerance))
}

fn log_quote(market: &MarketSnapshot, quote: &Quote) {
    let minimum_out = quote.minimum_out.unwrap_or(quote.amount_out);
    let average_price = quote
        .average_price
        .to_scaled(PRICE_SCALE)
        .unwrap_or(u64::MAX);

    emit!(QuoteIssued {
        market_id: market.market_id,
        side: quote.side,
        outcome: quote.outcome,
        amount_in: quote.amount_in,
        amount_out: quote.amount_out,
        fee: quote.fee,
        minimum_out,
    });

    msg!(
        "Market {} {:?} outcome {}: {} in, {} out (min {}), fee {}, avg price {}e-6, impact {} bps",
        market.market_id,
        quote.side,
        quote.outcome,
        quote.amount_in,
        quote.amount_out,
        minimum_out,
        quote.fee,
        average_price,
        quote.price_impact_bps
    );
}

#[error_code(offset = 6200)]
pub enum QuoteError {
    #[msg("Market is not open for trading")]
    MarketNotOpen,
    #[msg("Quoting is paused")]
    ProtocolPaused,
}
