use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_lib::{calc_accrued, AccrualArgs};

use crate::errors::{LiquidStakingError, Result};

/// Global reward accumulator.
///
/// Per-account settlement only needs `acc_reward_per_share` and the
/// account's own record, so no operation ever iterates over accounts.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardAccrual {
    /// Reward units owed per active share since inception, scaled by `PRECISION`.
    /// Never decreases
    pub acc_reward_per_share: u128,

    /// Time up to which `acc_reward_per_share` is current. Never decreases
    pub last_accrual_time: u64,

    /// Reward units emitted to shareholders since inception
    pub total_rewards_emitted: u128,
}

impl RewardAccrual {
    pub fn new(now: u64) -> Self {
        Self {
            last_accrual_time: now,
            ..Default::default()
        }
    }

    /// The accumulator advanced to `now` under the current share supply.
    /// Does not mutate `self`
    pub fn accrued(&self, reward_rate_per_second: u64, total_shares: u64, now: u64) -> Result<Self> {
        if now < self.last_accrual_time {
            return Err(LiquidStakingError::ClockRegression);
        }
        let accrued = calc_accrued(
            AccrualArgs {
                acc_reward_per_share: self.acc_reward_per_share,
                last_accrual_time: self.last_accrual_time,
                reward_rate_per_second,
                total_shares,
            },
            now,
        )
        .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        Ok(Self {
            acc_reward_per_share: accrued.acc_reward_per_share,
            last_accrual_time: accrued.last_accrual_time,
            total_rewards_emitted: self
                .total_rewards_emitted
                .checked_add(accrued.emitted)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
        })
    }
}
