//! Global Quoter Configuration
//!
//! Protocol-wide settings applied to every quote.

use anchor_lang::prelude::*;

use crate::amm::FeeModel;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["amm_config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Administrator allowed to change the fee or pause quoting
    pub admin: Pubkey,

    /// Trading fee in basis points (200 = 2%, max 3000)
    pub fee_bps: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Whether quoting is paused
    pub paused: bool,
}

impl Config {
    pub const SEED: &'static [u8] = b"amm_config";

    /// Fee model for the configured rate
    pub fn fee_model(&self) -> Result<FeeModel> {
        FeeModel::new(self.fee_bps)
    }
}
