//! Quoter Initialization
//!
//! Sets up the global fee configuration. Typically called once during
//! deployment; the admin can later change the fee or pause quoting.

use anchor_lang::prelude::*;

use crate::amm::MAX_FEE_BPS;
use crate::state::Config;

/// Event emitted when the fee rate changes
#[event]
pub struct FeeUpdated {
    pub admin: Pubkey,
    pub old_fee_bps: u64,
    pub new_fee_bps: u64,
}

/// Accounts required for quoter initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Quoter administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the quoter configuration
    pub fn initialize(&mut self, fee_bps: u64, bumps: InitializeBumps) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, ConfigError::FeeTooHigh);

        self.config.set_inner(Config {
            admin: self.admin.key(),
            fee_bps,
            bump: bumps.config,
            paused: false,
        });

        msg!("Quoter initialized!");
        msg!("Admin: {}", self.admin.key());
        msg!("Fee: {} bps", fee_bps);

        Ok(())
    }
}

/// Accounts for admin maintenance
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Current administrator
    pub admin: Signer<'info>,

    /// Global configuration account
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
        has_one = admin @ ConfigError::Unauthorized,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> UpdateConfig<'info> {
    /// Change the fee applied to future quotes
    pub fn update_fee(&mut self, fee_bps: u64) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, ConfigError::FeeTooHigh);

        let old_fee_bps = self.config.fee_bps;
        self.config.fee_bps = fee_bps;

        emit!(FeeUpdated {
            admin: self.admin.key(),
            old_fee_bps,
            new_fee_bps: fee_bps,
        });

        msg!("Fee updated: {} -> {} bps", old_fee_bps, fee_bps);

        Ok(())
    }

    /// Pause or resume quoting
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.config.paused = paused;
        msg!("Quoting paused: {}", paused);
        Ok(())
    }
}

#[error_code(offset = 6100)]
pub enum ConfigError {
    #[msg("Fee cannot exceed 30%")]
    FeeTooHigh,
    #[msg("Only the admin can change the configuration")]
    Unauthorized,
}
