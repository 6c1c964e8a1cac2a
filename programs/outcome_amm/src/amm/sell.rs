//! Inverse pricing: outcome shares in, collateral out.
//!
//! The trader returns `S` shares of outcome i and the pool burns `C`
//! complete sets, paying `C` collateral (less fee). `C` is the root of
//!
//! ```text
//! lhs(C) = (r_i + S − C) × Π_{j≠i} (r_j − C) = k
//! ```
//!
//! on the bracket `[0, hi)` with `hi = min(r_i + S, min_{j≠i} r_j)`. Every
//! factor is positive and strictly decreasing on the bracket, so `lhs` falls
//! strictly from `lhs(0) > k` to `lhs(hi) = 0` and the root is unique. The
//! payout is the largest integer `C` with `lhs(C) ≥ k`.

use anchor_lang::prelude::*;
use num_bigint::BigUint;

use super::impact::trade_impact_bps;
use super::reserves::{product, to_u64};
use super::{AmmError, FeeModel, Quote, Ratio, ReserveState, TradeSide};

/// Iteration ceiling for the bisection. The bracket is narrower than 2⁶⁴,
/// so 64 halvings always close it.
pub const MAX_SOLVER_ITERATIONS: u32 = 64;

/// Quote selling `shares_in` shares of `outcome` (1-based) back to the pool.
pub fn quote_sell(
    state: &ReserveState,
    outcome: u8,
    shares_in: u64,
    fees: FeeModel,
) -> Result<Quote> {
    state.validate()?;
    let index = state.outcome_index(outcome)?;

    if shares_in == 0 {
        return Ok(Quote::empty(TradeSide::Sell, outcome, *state));
    }

    let collateral = solve_burn(state, index, shares_in)?;

    // Every reserve must stay positive after the burn. The returned share
    // reserve must also fit in u64, which caps sells against near-u64::MAX pools.
    let mut after = Vec::with_capacity(state.count());
    for (j, &r) in state.reserves().iter().enumerate() {
        let settled = if j == index {
            r as u128 + shares_in as u128 - collateral as u128
        } else {
            (r as u128)
                .checked_sub(collateral as u128)
                .ok_or(AmmError::InsufficientLiquidity)?
        };
        require!(settled > 0, AmmError::InsufficientLiquidity);
        after.push(u64::try_from(settled).map_err(|_| error!(AmmError::NumericOverflow))?);
    }
    let reserves_after = ReserveState::new(&after)?;

    let (fee, credits_out) = fees.split(collateral);
    let price_impact_bps =
        trade_impact_bps(state, index, TradeSide::Sell, collateral, shares_in)?;

    Ok(Quote {
        side: TradeSide::Sell,
        outcome,
        amount_in: shares_in,
        amount_out: credits_out,
        gross_out: collateral,
        fee,
        average_price: Ratio::new(collateral, shares_in),
        price_impact_bps,
        reserves_after,
        minimum_out: None,
    })
}

/// Gross collateral released for `shares_in` shares of slot `index`,
/// rounded down.
pub(crate) fn solve_burn(state: &ReserveState, index: usize, shares_in: u64) -> Result<u64> {
    let equation = BurnEquation::new(state, index, shares_in);
    // Unreachable on validated reserves, where the bracket is at least 1 wide
    require!(equation.upper > 0, AmmError::InsufficientLiquidity);

    if state.count() == 2 {
        equation.closed_form()
    } else {
        equation.bisect()
    }
}

/// `lhs(C) = k` for one sell against one reserve snapshot.
struct BurnEquation {
    k: BigUint,
    shares: u64,
    /// `r_i + S`
    target: u128,
    others: Vec<u64>,
    /// Exclusive upper end of the bracket
    upper: u64,
}

impl BurnEquation {
    fn new(state: &ReserveState, index: usize, shares_in: u64) -> Self {
        let reserves = state.reserves();
        let target = reserves[index] as u128 + shares_in as u128;
        let others: Vec<u64> = reserves
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .map(|(_, &r)| r)
            .collect();

        let floor = others.iter().copied().min().unwrap_or(0);
        let upper = (floor as u128).min(target) as u64;

        Self {
            k: state.invariant(),
            shares: shares_in,
            target,
            others,
            upper,
        }
    }

    /// `lhs(c) ≥ k`, for `c` inside the bracket.
    fn holds(&self, c: u64) -> bool {
        let lhs = product(self.others.iter().map(|&r| r - c)) * (self.target - c as u128);
        lhs >= self.k
    }

    /// Two outcomes: `C² − bC + S·r_o = 0` with `b = r_i + S + r_o`.
    ///
    /// The discriminant `(r_i + S − r_o)² + 4·r_i·r_o` is always positive, and
    /// the smaller root is the one inside the bracket.
    fn closed_form(&self) -> Result<u64> {
        let other = self.others[0];
        let b = BigUint::from(self.target) + other;
        let discriminant = &b * &b - BigUint::from(self.shares) * other * 4u32;

        // A ceiling root keeps the estimate at or below the exact root
        let mut root = discriminant.sqrt();
        if &root * &root < discriminant {
            root += 1u32;
        }
        let estimate = (b - root) / 2u32;
        let mut c = to_u64(estimate)?;

        // The estimate is at most one unit short of floor(root)
        for _ in 0..2 {
            if c + 1 < self.upper && self.holds(c + 1) {
                c += 1;
            }
        }
        require!(self.holds(c), AmmError::NonConvergence);
        Ok(c)
    }

    /// Three or four outcomes: bisection holding `lhs(lo) ≥ k > lhs(hi)`.
    fn bisect(&self) -> Result<u64> {
        let mut lo = 0u64;
        let mut hi = self.upper;

        for _ in 0..MAX_SOLVER_ITERATIONS {
            if hi - lo <= 1 {
                break;
            }
            let mid = lo + (hi - lo) / 2;
            if self.holds(mid) {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        require!(hi - lo <= 1, AmmError::NonConvergence);
        Ok(lo)
    }
}
