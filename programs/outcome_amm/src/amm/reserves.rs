//! Reserve snapshots and the product invariant.

use std::ops::Mul;

use anchor_lang::prelude::*;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::{AmmError, BPS_DENOMINATOR};

/// Fewest outcomes a market can have
pub const MIN_OUTCOMES: usize = 2;

/// Most outcomes a market can have
pub const MAX_OUTCOMES: usize = 4;

/// Per-outcome liquidity of a market, in micro-units of collateral.
///
/// The engine never mutates a `ReserveState`; trades produce a new,
/// hypothetical state that lives inside the returned quote. Slots at or past
/// `count` are unused.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ReserveState {
    reserves: [u64; MAX_OUTCOMES],
    count: u8,
}

impl ReserveState {
    /// Build a validated state from one reserve per outcome.
    pub fn new(reserves: &[u64]) -> Result<Self> {
        require!(
            (MIN_OUTCOMES..=MAX_OUTCOMES).contains(&reserves.len()),
            AmmError::InvalidReserves
        );

        let mut slots = [0u64; MAX_OUTCOMES];
        slots[..reserves.len()].copy_from_slice(reserves);

        let state = Self {
            reserves: slots,
            count: reserves.len() as u8,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check the outcome count is in range and every active reserve is positive.
    ///
    /// States can arrive deserialized from outside, so every pricing entry
    /// point calls this before touching the reserves.
    pub fn validate(&self) -> Result<()> {
        let count = self.count as usize;
        require!(
            (MIN_OUTCOMES..=MAX_OUTCOMES).contains(&count),
            AmmError::InvalidReserves
        );
        require!(
            self.reserves[..count].iter().all(|&r| r > 0),
            AmmError::InvalidReserves
        );
        Ok(())
    }

    /// Number of active outcomes
    pub fn count(&self) -> usize {
        self.count as usize
    }

    /// Active reserves, one per outcome
    pub fn reserves(&self) -> &[u64] {
        &self.reserves[..self.count()]
    }

    /// Reserve of a 1-based outcome
    pub fn reserve(&self, outcome: u8) -> Result<u64> {
        Ok(self.reserves[self.outcome_index(outcome)?])
    }

    /// Convert a 1-based outcome into a slot index.
    pub fn outcome_index(&self, outcome: u8) -> Result<usize> {
        let outcome = outcome as usize;
        require!(
            outcome >= 1 && outcome <= self.count(),
            AmmError::InvalidInput
        );
        Ok(outcome - 1)
    }

    /// The product of all active reserves, k.
    ///
    /// Recomputed on every call; a state never carries a cached invariant.
    pub fn invariant(&self) -> BigUint {
        product(self.reserves().iter().copied())
    }

    /// Product of every active reserve except slot `skip`.
    pub fn product_excluding(&self, skip: usize) -> BigUint {
        product(
            self.reserves()
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != skip)
                .map(|(_, &r)| r),
        )
    }

    /// Unnormalized spot weights `Π_{j≠m} r_j` for every outcome m.
    ///
    /// The spot price of outcome m is its weight over the sum of all weights.
    pub fn spot_weights(&self) -> Vec<BigUint> {
        (0..self.count()).map(|m| self.product_excluding(m)).collect()
    }

    /// Spot price of a 1-based outcome in basis points, rounded down.
    ///
    /// A deeper reserve means a cheaper outcome.
    pub fn spot_price_bps(&self, outcome: u8) -> Result<u64> {
        self.validate()?;
        let index = self.outcome_index(outcome)?;
        let weights = self.spot_weights();
        let total: BigUint = weights.iter().sum();
        to_u64(&weights[index] * BPS_DENOMINATOR / total)
    }

    /// Spot prices of all outcomes in basis points.
    ///
    /// Each entry is floored independently, so the sum can fall short of
    /// 10 000 by at most `count - 1`.
    pub fn spot_prices_bps(&self) -> Result<Vec<u64>> {
        self.validate()?;
        let weights = self.spot_weights();
        let total: BigUint = weights.iter().sum();
        weights
            .iter()
            .map(|w| to_u64(w * BPS_DENOMINATOR / &total))
            .collect()
    }
}

/// Multiply reserves in arbitrary precision.
pub(crate) fn product<T>(values: impl Iterator<Item = T>) -> BigUint
where
    BigUint: Mul<T, Output = BigUint>,
{
    values.fold(BigUint::one(), |acc, v| acc * v)
}

/// Narrow a big integer back to `u64`.
pub(crate) fn to_u64(value: BigUint) -> Result<u64> {
    value
        .to_u64()
        .ok_or_else(|| error!(AmmError::NumericOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_counts() {
        assert!(ReserveState::new(&[1_000_000]).is_err());
        assert!(ReserveState::new(&[1; 5]).is_err());
        assert!(ReserveState::new(&[1_000_000, 2_000_000]).is_ok());
        assert!(ReserveState::new(&[1, 2, 3, 4]).is_ok());
    }

    #[test]
    fn test_new_rejects_zero_reserve() {
        let err = ReserveState::new(&[1_000_000, 0, 500_000]).unwrap_err();
        assert_eq!(err, error!(AmmError::InvalidReserves));
    }

    #[test]
    fn test_default_state_is_invalid() {
        assert!(ReserveState::default().validate().is_err());
    }

    #[test]
    fn test_invariant_does_not_wrap() {
        // Four reserves near 10¹² multiply to ~10⁴⁸, far past u128
        let r = 1_000_000_000_000u64;
        let state = ReserveState::new(&[r, r, r, r]).unwrap();
        let expected = BigUint::from(10u32).pow(48);
        assert_eq!(state.invariant(), expected);
    }

    #[test]
    fn test_outcome_index_is_one_based() {
        let state = ReserveState::new(&[10, 20, 30]).unwrap();
        assert_eq!(state.outcome_index(1).unwrap(), 0);
        assert_eq!(state.outcome_index(3).unwrap(), 2);
        assert!(state.outcome_index(0).is_err());
        assert!(state.outcome_index(4).is_err());
        assert_eq!(state.reserve(2).unwrap(), 20);
    }

    #[test]
    fn test_balanced_spot_prices() {
        let state = ReserveState::new(&[500_000, 500_000, 500_000]).unwrap();
        let prices = state.spot_prices_bps().unwrap();
        assert_eq!(prices, vec![3333, 3333, 3333]);
    }

    #[test]
    fn test_deeper_reserve_is_cheaper() {
        let state = ReserveState::new(&[400_000, 300_000, 200_000, 100_000]).unwrap();
        let prices = state.spot_prices_bps().unwrap();
        assert_eq!(prices, vec![1200, 1600, 2400, 4800]);
        assert_eq!(state.spot_price_bps(4).unwrap(), 4800);
    }
}
