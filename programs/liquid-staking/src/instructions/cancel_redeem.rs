use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation};

use crate::{
    errors::{LiquidStakingError, Result},
    state::StakeAccount,
    LiquidStaking,
};

impl LiquidStaking {
    /// Returns the account's locked shares to its active balance.
    ///
    /// The returning shares earn from `now` on, never for the time they spent locked.
    /// Returns the number of shares restored.
    pub fn cancel_redeem(&mut self, account: &AccountId, now: u64) -> Result<u64> {
        let accrual = self.accrued(now)?;
        let stake_account = self.settled_account(account, &accrual)?;
        let request = stake_account
            .pending_redemption
            .ok_or(LiquidStakingError::NotFound)?;

        let vault = self.pool.vault.unlock(request.underlying_owed)?;
        let shares = self.pool.shares.unlock(request.amount_shares)?;
        let restored = stake_account
            .shares
            .checked_add(request.amount_shares)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        let stake_account = StakeAccount {
            pending_redemption: None,
            ..stake_account.with_shares(restored, accrual.acc_reward_per_share)?
        };

        self.commit_accrual(accrual);
        self.pool.vault = vault;
        self.pool.shares = shares;
        self.pool.pending_redemptions -= 1;
        self.store_account(account, stake_account);
        self.emit(LedgerEvent {
            operation: Operation::CancelRedeem,
            account: account.clone(),
            amounts: EventAmounts {
                underlying: request.underlying_owed,
                shares: request.amount_shares,
                reward: 0,
            },
            timestamp: now,
            unlock_time: None,
        });
        Ok(request.amount_shares)
    }
}
