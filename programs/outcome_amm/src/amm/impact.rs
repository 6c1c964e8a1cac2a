//! Price impact against the pre-trade spot price.
//!
//! ```text
//! spot_i = Π_{j≠i} r_j / Σ_m Π_{j≠m} r_j
//!
//! buy:   (avg − spot) / spot × 10 000
//! sell:  (spot − avg) / spot × 10 000
//! ```
//!
//! Positive means the trade executes worse than spot for the trader.

use anchor_lang::prelude::*;
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

use super::{quote_buy, quote_sell, AmmError, FeeModel, ReserveState, TradeSide, BPS_DENOMINATOR};

/// Price impact in basis points of buying `outcome` with `amount_in`.
pub fn buy_price_impact(
    state: &ReserveState,
    outcome: u8,
    amount_in: u64,
    fees: FeeModel,
) -> Result<i64> {
    Ok(quote_buy(state, outcome, amount_in, fees)?.price_impact_bps)
}

/// Price impact in basis points of selling `shares_in` of `outcome`.
pub fn sell_price_impact(
    state: &ReserveState,
    outcome: u8,
    shares_in: u64,
    fees: FeeModel,
) -> Result<i64> {
    Ok(quote_sell(state, outcome, shares_in, fees)?.price_impact_bps)
}

/// Impact of exchanging `collateral` for `shares` of slot `index`, priced
/// against `state` before the trade. Exact rational arithmetic, truncated
/// toward zero.
pub(crate) fn trade_impact_bps(
    state: &ReserveState,
    index: usize,
    side: TradeSide,
    collateral: u64,
    shares: u64,
) -> Result<i64> {
    if shares == 0 {
        return Ok(0);
    }

    let weights = state.spot_weights();
    let total: BigUint = weights.iter().sum();

    // avg / spot = (collateral × total) / (shares × weight_i)
    let paid = BigInt::from(BigUint::from(collateral) * total);
    let fair = BigInt::from(BigUint::from(shares) * &weights[index]);

    let excess = match side {
        TradeSide::Buy => &paid - &fair,
        TradeSide::Sell => &fair - &paid,
    };

    (excess * BPS_DENOMINATOR / fair)
        .to_i64()
        .ok_or_else(|| error!(AmmError::NumericOverflow))
}
