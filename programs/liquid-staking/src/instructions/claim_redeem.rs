use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation};

use crate::{
    errors::{LiquidStakingError, Result},
    state::StakeAccount,
    LiquidStaking,
};

impl LiquidStaking {
    /// Burns the account's locked shares and pays out the underlying they were
    /// valued at when the redemption was requested.
    ///
    /// Returns the underlying paid out.
    pub fn claim_redeem(&mut self, account: &AccountId, now: u64) -> Result<u64> {
        let accrual = self.accrued(now)?;
        let stake_account = self.settled_account(account, &accrual)?;
        let request = stake_account
            .pending_redemption
            .ok_or(LiquidStakingError::NotFound)?;
        request.ensure_claimable(now)?;

        let vault = self.pool.vault.withdraw_locked(request.underlying_owed)?;
        let shares = self.pool.shares.burn_locked(request.amount_shares)?;
        let stake_account = StakeAccount {
            pending_redemption: None,
            ..stake_account
        };

        self.commit_accrual(accrual);
        self.pool.vault = vault;
        self.pool.shares = shares;
        self.pool.pending_redemptions -= 1;
        self.store_account(account, stake_account);
        self.emit(LedgerEvent {
            operation: Operation::ClaimRedeem,
            account: account.clone(),
            amounts: EventAmounts {
                underlying: request.underlying_owed,
                shares: request.amount_shares,
                reward: 0,
            },
            timestamp: now,
            unlock_time: None,
        });
        Ok(request.underlying_owed)
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::test_utils::*;

    use super::*;

    #[test]
    fn claim_before_unlock_is_too_early() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.request_redeem(&alice(), 1_000, 10).unwrap();
        assert_eq!(
            ledger.claim_redeem(&alice(), 86_409),
            Err(LiquidStakingError::TooEarly)
        );
        assert_eq!(ledger.claim_redeem(&alice(), 86_410), Ok(1_000));
    }

    #[test]
    fn claim_without_request_is_not_found() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.claim_redeem(&alice(), 0),
            Err(LiquidStakingError::NotFound)
        );
    }

    #[test]
    fn claim_pays_lock_time_value_after_later_deposits() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 2_000, 0).unwrap();
        ledger.request_redeem(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&bob(), 50_000, 100).unwrap();

        assert_eq!(ledger.claim_redeem(&alice(), 86_400), Ok(1_000));
        let state = ledger.pool_state();
        assert_eq!(state.total_underlying, 51_000);
        assert_eq!(state.locked_underlying, 0);
        assert_eq!(state.locked_shares, 0);
        assert_eq!(state.total_shares, 51_000);
    }

    #[test]
    fn partial_claim_keeps_account() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 2_000, 0).unwrap();
        ledger.request_redeem(&alice(), 500, 0).unwrap();
        ledger.claim_redeem(&alice(), 86_400).unwrap();

        let view = ledger.account(&alice(), 86_400).unwrap().unwrap();
        assert_eq!(view.shares, 1_500);
        assert!(view.pending_redemption.is_none());
    }
}
