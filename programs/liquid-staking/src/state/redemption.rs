use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_interface::RedemptionView;

use crate::errors::{LiquidStakingError, Result};

/// A pending unstake. An account holds at most one; cancelling or claiming destroys it
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedemptionRequest {
    /// Shares taken out of the account's active balance at request time
    pub amount_shares: u64,

    /// `amount_shares` valued at the share price when the request was made
    pub underlying_owed: u64,

    pub requested_at: u64,

    /// Earliest time the request can be claimed
    pub unlock_time: u64,
}

impl RedemptionRequest {
    pub fn new(
        amount_shares: u64,
        underlying_owed: u64,
        now: u64,
        cooldown_period: u64,
    ) -> Result<Self> {
        Ok(Self {
            amount_shares,
            underlying_owed,
            requested_at: now,
            unlock_time: now
                .checked_add(cooldown_period)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
        })
    }

    pub fn is_claimable(&self, now: u64) -> bool {
        now >= self.unlock_time
    }

    pub fn ensure_claimable(&self, now: u64) -> Result<()> {
        match self.is_claimable(now) {
            true => Ok(()),
            false => Err(LiquidStakingError::TooEarly),
        }
    }

    pub fn view(&self) -> RedemptionView {
        RedemptionView {
            amount_shares: self.amount_shares,
            underlying_owed: self.underlying_owed,
            requested_at: self.requested_at,
            unlock_time: self.unlock_time,
        }
    }
}
