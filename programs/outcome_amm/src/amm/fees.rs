//! Flat-rate trading fee.
//!
//! Buys pay the fee on the gross collateral in; sells pay it on the gross
//! collateral the pool releases. Both round down so the remainder stays in
//! the pool.

use anchor_lang::prelude::*;

use super::{AmmError, BPS_DENOMINATOR};

/// Fee charged when no protocol configuration overrides it (2%)
pub const DEFAULT_FEE_BPS: u64 = 200;

/// Highest fee a market may charge (30%)
pub const MAX_FEE_BPS: u64 = 3_000;

/// Fee rate, only constructible through [`FeeModel::new`] or `Default`, so
/// `fee_bps` never exceeds [`MAX_FEE_BPS`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeeModel {
    fee_bps: u64,
}

impl Default for FeeModel {
    fn default() -> Self {
        Self {
            fee_bps: DEFAULT_FEE_BPS,
        }
    }
}

impl FeeModel {
    pub fn new(fee_bps: u64) -> Result<Self> {
        require!(fee_bps <= MAX_FEE_BPS, AmmError::InvalidInput);
        Ok(Self { fee_bps })
    }

    pub fn fee_bps(&self) -> u64 {
        self.fee_bps
    }

    /// Fee owed on `amount`: `⌊amount × fee_bps / 10 000⌋`.
    pub fn estimate(&self, amount: u64) -> u64 {
        // fee_bps <= MAX_FEE_BPS, so the quotient always fits back into u64
        ((amount as u128 * self.fee_bps as u128) / BPS_DENOMINATOR as u128) as u64
    }

    /// Split a gross amount into `(fee, net)`.
    pub fn split(&self, gross: u64) -> (u64, u64) {
        let fee = self.estimate(gross);
        (fee, gross - fee)
    }
}

/// Fee on `amount` at the default 2% rate.
pub fn estimate_fee(amount: u64) -> u64 {
    FeeModel::default().estimate(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate() {
        assert_eq!(estimate_fee(100_000), 2_000);
        assert_eq!(estimate_fee(0), 0);
    }

    #[test]
    fn test_fee_rounds_down() {
        // 2% of 49 is 0.98
        assert_eq!(estimate_fee(49), 0);
        assert_eq!(estimate_fee(50), 1);
        assert_eq!(estimate_fee(149), 2);
    }

    #[test]
    fn test_split_conserves_amount() {
        let fees = FeeModel::new(125).unwrap();
        let (fee, net) = fees.split(1_234_567);
        assert_eq!(fee, 15_432);
        assert_eq!(fee + net, 1_234_567);
    }

    #[test]
    fn test_large_amount_does_not_overflow() {
        let fee = FeeModel::new(MAX_FEE_BPS).unwrap().estimate(u64::MAX);
        assert_eq!(fee, ((u64::MAX as u128 * 3_000) / 10_000) as u64);
    }

    #[test]
    fn test_rate_cap() {
        assert!(FeeModel::new(MAX_FEE_BPS).is_ok());
        assert!(FeeModel::new(MAX_FEE_BPS + 1).is_err());
        assert_eq!(FeeModel::new(0).unwrap().estimate(1_000_000), 0);
    }
}
