//! Instruction handlers for the outcome AMM quoter
//!
//! - `initialize` - Create the fee configuration (admin, once)
//! - `update_fee` / `set_paused` - Admin maintenance
//! - `get_buy_quote` / `get_sell_quote` - Read-only pricing, returned as
//!   return data so clients can simulate instead of send

pub mod initialize;
pub mod get_quote;

pub use initialize::*;
pub use get_quote::*;
