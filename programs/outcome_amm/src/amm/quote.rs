//! Quote values returned by the pricing engine.

use anchor_lang::prelude::*;

use super::{minimum_out, ReserveState, SlippageTolerance};

/// Fixed-point scale for logging prices (1e6)
pub const PRICE_SCALE: u64 = 1_000_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TradeSide {
    /// Collateral in, outcome shares out
    Buy,
    /// Outcome shares in, collateral out
    Sell,
}

/// Exact rational price, collateral per share.
///
/// Logging only; nothing on the settlement path reads it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    /// Price of a trade that moved nothing
    pub const ZERO: Ratio = Ratio {
        numerator: 0,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        Self {
            numerator,
            denominator,
        }
    }

    /// Price scaled by `scale`, rounded down. `None` if it does not fit.
    pub fn to_scaled(&self, scale: u64) -> Option<u64> {
        let scaled = (self.numerator as u128 * scale as u128) / self.denominator as u128;
        u64::try_from(scaled).ok()
    }
}

/// Priced trade against a reserve snapshot.
///
/// A quote is a prediction of what the settlement layer will do. It carries
/// no ledger identity and is never booked.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Quote {
    pub side: TradeSide,
    /// 1-based outcome traded
    pub outcome: u8,
    /// Gross collateral (buy) or shares (sell) supplied by the trader
    pub amount_in: u64,
    /// Shares (buy) or collateral net of fee (sell) delivered to the trader
    pub amount_out: u64,
    /// Collateral released before the fee (sell); equals `amount_out` on buys
    pub gross_out: u64,
    pub fee: u64,
    pub average_price: Ratio,
    /// Signed basis points, positive when worse than spot
    pub price_impact_bps: i64,
    /// Hypothetical reserves once the trade settles
    pub reserves_after: ReserveState,
    /// Set by [`Quote::with_slippage`]
    pub minimum_out: Option<u64>,
}

impl Quote {
    /// Zero-sized trade: nothing moves and the reserves are unchanged.
    pub(crate) fn empty(side: TradeSide, outcome: u8, reserves: ReserveState) -> Self {
        Self {
            side,
            outcome,
            amount_in: 0,
            amount_out: 0,
            gross_out: 0,
            fee: 0,
            average_price: Ratio::ZERO,
            price_impact_bps: 0,
            reserves_after: reserves,
            minimum_out: None,
        }
    }

    /// Copy of this quote with the minimum acceptable output filled in.
    pub fn with_slippage(&self, tolerance: SlippageTolerance) -> Self {
        Self {
            minimum_out: Some(minimum_out(self.amount_out, tolerance)),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_scaling() {
        let price = Ratio::new(98_000, 187_253);
        assert_eq!(price.to_scaled(PRICE_SCALE), Some(523_356));
        assert_eq!(Ratio::new(u64::MAX, 1).to_scaled(PRICE_SCALE), None);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(Ratio::new(5, 0), Ratio::ZERO);
        assert_eq!(Ratio::ZERO.to_scaled(PRICE_SCALE), Some(0));
    }

    #[test]
    fn test_with_slippage_leaves_original_untouched() {
        let reserves = ReserveState::new(&[1_000_000, 1_000_000]).unwrap();
        let quote = Quote {
            amount_out: 1_000,
            ..Quote::empty(TradeSide::Buy, 1, reserves)
        };
        let bounded = quote.with_slippage(SlippageTolerance::from_percent(1).unwrap());
        assert_eq!(bounded.minimum_out, Some(990));
        assert_eq!(quote.minimum_out, None);
    }
}
