//! Market Snapshot
//!
//! The market record as published by the indexing layer. The quoter reads
//! it and never writes it back; the ledger owns the real reserves.

use anchor_lang::prelude::*;

use crate::amm::ReserveState;

/// Read-only view of one market at the time of quoting
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct MarketSnapshot {
    /// Market identifier assigned by the ledger
    pub market_id: u64,

    /// Lifecycle status at snapshot time
    pub status: MarketStatus,

    /// Per-outcome reserves at snapshot time
    pub reserves: ReserveState,
}

impl MarketSnapshot {
    pub fn is_open(&self) -> bool {
        self.status == MarketStatus::Open
    }
}

/// Market lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MarketStatus {
    /// Market is open for trading
    #[default]
    Open,
    /// Trading ended, awaiting resolution
    Closed,
    /// Market has been resolved
    Resolved,
}
