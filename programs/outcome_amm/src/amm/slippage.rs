//! Minimum-output bounds for the settlement layer.
//!
//! This module only computes the bound. Enforcing it against the ledger's
//! actual fill happens at settlement.

use anchor_lang::prelude::*;

use super::{AmmError, BPS_DENOMINATOR};

/// Largest deviation a trader accepts between quoted and executed output.
///
/// Built only through `from_bps`/`from_percent`; the wire form is a plain
/// `u16` instruction argument, checked on the way in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SlippageTolerance {
    bps: u16,
}

impl SlippageTolerance {
    pub fn from_bps(bps: u16) -> Result<Self> {
        require!(bps as u64 <= BPS_DENOMINATOR, AmmError::InvalidInput);
        Ok(Self { bps })
    }

    pub fn from_percent(percent: u16) -> Result<Self> {
        require!(percent <= 100, AmmError::InvalidInput);
        Ok(Self { bps: percent * 100 })
    }

    pub fn bps(&self) -> u16 {
        self.bps
    }
}

/// `⌊quoted × (10 000 − tolerance) / 10 000⌋`, never above `quoted`.
pub fn minimum_out(quoted: u64, tolerance: SlippageTolerance) -> u64 {
    let keep = BPS_DENOMINATOR - tolerance.bps as u64;
    ((quoted as u128 * keep as u128) / BPS_DENOMINATOR as u128) as u64
}

/// Least number of shares a buy may deliver.
pub fn minimum_shares_out(quoted_shares: u64, tolerance: SlippageTolerance) -> u64 {
    minimum_out(quoted_shares, tolerance)
}

/// Least collateral a sell may pay out.
pub fn minimum_credits_out(quoted_credits: u64, tolerance: SlippageTolerance) -> u64 {
    minimum_out(quoted_credits, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bound() {
        let half = SlippageTolerance::from_percent(50).unwrap();
        assert_eq!(minimum_shares_out(187_253, half), 93_626);

        let one = SlippageTolerance::from_percent(1).unwrap();
        assert_eq!(minimum_credits_out(96_040, one), 95_079);
    }

    #[test]
    fn test_fractional_percent() {
        // 0.5%
        let tol = SlippageTolerance::from_bps(50).unwrap();
        assert_eq!(minimum_out(10_001, tol), 9_950);
    }

    #[test]
    fn test_zero_and_full_tolerance() {
        let none = SlippageTolerance::default();
        assert_eq!(minimum_out(12_345, none), 12_345);

        let all = SlippageTolerance::from_percent(100).unwrap();
        assert_eq!(minimum_out(12_345, all), 0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(SlippageTolerance::from_percent(101).is_err());
        assert!(SlippageTolerance::from_bps(10_001).is_err());
    }

    #[test]
    fn test_no_overflow_at_max() {
        let tol = SlippageTolerance::from_bps(1).unwrap();
        let min = minimum_out(u64::MAX, tol);
        assert!(min < u64::MAX);
    }
}
