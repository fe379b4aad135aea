use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_lib::{calc_pending_reward, calc_reward_debt};

use crate::{
    errors::{LiquidStakingError, Result},
    state::RedemptionRequest,
};

#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StakeAccount {
    /// Active shares. Locked shares are held by `pending_redemption` instead
    pub shares: u64,

    /// floor(shares * acc_reward_per_share / PRECISION) at the last settlement
    pub reward_debt: u128,

    /// Settled reward not yet paid out
    pub unclaimed_reward: u128,

    pub pending_redemption: Option<RedemptionRequest>,
}

impl StakeAccount {
    /// Moves reward earned since the last settlement into `unclaimed_reward`
    pub fn settle(&self, acc_reward_per_share: u128) -> Result<Self> {
        let pending = calc_pending_reward(self.shares, acc_reward_per_share, self.reward_debt)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        Ok(Self {
            unclaimed_reward: self
                .unclaimed_reward
                .checked_add(pending)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            reward_debt: calc_reward_debt(self.shares, acc_reward_per_share)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }

    /// Replaces the share balance of a settled account.
    /// The new balance only earns from `acc_reward_per_share` onwards
    pub fn with_shares(&self, shares: u64, acc_reward_per_share: u128) -> Result<Self> {
        Ok(Self {
            shares,
            reward_debt: calc_reward_debt(shares, acc_reward_per_share)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }

    /// Nothing left to track: the account can be dropped
    pub fn is_empty(&self) -> bool {
        self.shares == 0 && self.unclaimed_reward == 0 && self.pending_redemption.is_none()
    }
}
