//! # Fixed-Product Market Maker
//!
//! Pricing engine for prediction markets with 2 to 4 outcomes. Every
//! outcome has a reserve, and the product of all reserves is the conserved
//! quantity:
//!
//! ```text
//!            k = r₁ × r₂ × … × rₙ
//!
//!   ┌──────────────────────────────────────────────┐
//!   │  BUY  outcome i with A collateral             │
//!   │    1. fee = ⌊A × fee_bps / 10 000⌋           │
//!   │    2. mint (A − fee) complete sets            │
//!   │    3. pay out outcome i until Π r = k again   │
//!   │                                               │
//!   │  SELL S shares of outcome i                   │
//!   │    1. return S shares to the pool             │
//!   │    2. burn C complete sets until Π r = k      │
//!   │    3. pay out C − ⌊C × fee_bps / 10 000⌋      │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! All settlement-relevant arithmetic is integer. Products of reserves are
//! computed as [`num_bigint::BigUint`] since four reserves near 10¹² overflow
//! any primitive width. Rounding always favours the pool.
//!
//! Outcomes are addressed 1-based throughout the public API.

pub mod buy;
pub mod fees;
pub mod impact;
pub mod quote;
pub mod reserves;
pub mod sell;
pub mod slippage;

pub use buy::*;
pub use fees::*;
pub use impact::*;
pub use quote::*;
pub use reserves::*;
pub use sell::*;
pub use slippage::*;

use anchor_lang::prelude::*;

/// Basis points scale (10 000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Errors raised by the pricing engine
#[error_code]
pub enum AmmError {
    #[msg("Invalid input: zero-sized or out-of-range argument")]
    InvalidInput,
    #[msg("Invalid reserves: need 2 to 4 outcomes with positive reserves")]
    InvalidReserves,
    #[msg("Insufficient liquidity for this trade")]
    InsufficientLiquidity,
    #[msg("Numeric overflow: result does not fit the output type")]
    NumericOverflow,
    #[msg("Solver did not converge within its iteration budget")]
    NonConvergence,
}
