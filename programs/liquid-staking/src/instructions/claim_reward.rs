use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation};

use crate::{
    errors::{LiquidStakingError, Result},
    state::StakeAccount,
    LiquidStaking,
};

impl LiquidStaking {
    /// Pays out all reward the account has earned up to `now`.
    /// Paying 0 is a valid no-op. Returns the reward paid
    pub fn claim_reward(&mut self, account: &AccountId, now: u64) -> Result<u128> {
        let accrual = self.accrued(now)?;
        let stake_account = self.settled_account(account, &accrual)?;
        let payout = stake_account.unclaimed_reward;
        let total_rewards_paid = self
            .pool
            .total_rewards_paid
            .checked_add(payout)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        let stake_account = StakeAccount {
            unclaimed_reward: 0,
            ..stake_account
        };

        self.commit_accrual(accrual);
        self.pool.total_rewards_paid = total_rewards_paid;
        self.store_account(account, stake_account);
        self.emit(LedgerEvent {
            operation: Operation::ClaimReward,
            account: account.clone(),
            amounts: EventAmounts {
                underlying: 0,
                shares: 0,
                reward: payout,
            },
            timestamp: now,
            unlock_time: None,
        });
        Ok(payout)
    }
}
