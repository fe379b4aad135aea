use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation, RedemptionView};
use liquid_staking_lib::calc_underlying_for_shares;

use crate::{
    errors::{LiquidStakingError, Result},
    state::{RedemptionRequest, StakeAccount},
    LiquidStaking,
};

impl LiquidStaking {
    /// Locks `amount_shares` of the account's active shares for redemption.
    ///
    /// The locked shares stop earning immediately and are valued at the current
    /// share price. They can be claimed once `cooldown_period` has elapsed, or
    /// cancelled at any time before that.
    pub fn request_redeem(
        &mut self,
        account: &AccountId,
        amount_shares: u64,
        now: u64,
    ) -> Result<RedemptionView> {
        let accrual = self.accrued(now)?;
        let stake_account = self.settled_account(account, &accrual)?;
        if stake_account.pending_redemption.is_some() {
            return Err(LiquidStakingError::AlreadyPending);
        }
        if amount_shares == 0 {
            return Err(LiquidStakingError::ZeroAmount);
        }
        if amount_shares > stake_account.shares {
            return Err(LiquidStakingError::InsufficientShares);
        }

        // order matters, price the shares before they leave the supply
        let underlying_owed = calc_underlying_for_shares(self.pool.balance(), amount_shares)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        let vault = self.pool.vault.lock(underlying_owed)?;
        let shares = self.pool.shares.lock(amount_shares)?;
        let request = RedemptionRequest::new(
            amount_shares,
            underlying_owed,
            now,
            self.pool.config.cooldown_period,
        )?;
        let stake_account = StakeAccount {
            pending_redemption: Some(request),
            ..stake_account.with_shares(
                stake_account.shares - amount_shares,
                accrual.acc_reward_per_share,
            )?
        };

        self.commit_accrual(accrual);
        self.pool.vault = vault;
        self.pool.shares = shares;
        self.pool.pending_redemptions += 1;
        self.store_account(account, stake_account);
        self.emit(LedgerEvent {
            operation: Operation::RequestRedeem,
            account: account.clone(),
            amounts: EventAmounts {
                underlying: underlying_owed,
                shares: amount_shares,
                reward: 0,
            },
            timestamp: now,
            unlock_time: Some(request.unlock_time),
        });
        Ok(request.view())
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::test_utils::*;

    use super::*;

    #[test]
    fn request_moves_shares_out_of_active_supply() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 3_000, 0).unwrap();

        let request = ledger.request_redeem(&alice(), 1_000, 10).unwrap();
        assert_eq!(
            request,
            RedemptionView {
                amount_shares: 1_000,
                underlying_owed: 1_000,
                requested_at: 10,
                unlock_time: 86_410,
            }
        );

        let state = ledger.pool_state();
        assert_eq!(state.total_shares, 2_000);
        assert_eq!(state.locked_shares, 1_000);
        assert_eq!(state.total_underlying, 3_000);
        assert_eq!(state.locked_underlying, 1_000);
        assert_eq!(ledger.stake_account(&alice()).unwrap().shares, 2_000);
    }

    #[test]
    fn second_request_is_already_pending() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 3_000, 0).unwrap();
        ledger.request_redeem(&alice(), 1_000, 0).unwrap();
        assert_eq!(
            ledger.request_redeem(&alice(), 1_000, 1),
            Err(LiquidStakingError::AlreadyPending)
        );
    }

    #[test]
    fn cannot_redeem_more_than_active_shares() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        assert_eq!(
            ledger.request_redeem(&alice(), 1_001, 0),
            Err(LiquidStakingError::InsufficientShares)
        );
        assert_eq!(
            ledger.request_redeem(&bob(), 1, 0),
            Err(LiquidStakingError::InsufficientShares)
        );
        assert_eq!(
            ledger.request_redeem(&alice(), 0, 0),
            Err(LiquidStakingError::ZeroAmount)
        );
    }

    #[test]
    fn locked_shares_stop_earning() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&bob(), 1_000, 0).unwrap();
        ledger.request_redeem(&bob(), 1_000, 10).unwrap();

        // 10s split evenly, then 10s to alice alone
        assert_eq!(ledger.claim_reward(&alice(), 20), Ok(1_500));
        assert_eq!(ledger.claim_reward(&bob(), 20), Ok(500));
    }

    #[test]
    fn request_below_min_stake_is_allowed() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        assert!(ledger.request_redeem(&alice(), 999, 0).is_ok());
        assert_eq!(ledger.stake_account(&alice()).unwrap().shares, 1);
    }
}
