use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation};
use liquid_staking_lib::{calc_shares_to_mint, calc_underlying_for_shares};

use crate::{
    errors::{LiquidStakingError, Result},
    LiquidStaking,
};

impl LiquidStaking {
    /// Deposits `amount` underlying for `account` and mints shares at the current share price.
    ///
    /// The account's resulting active stake, valued in underlying, must lie within
    /// `[min_stake, max_stake]`. Returns the number of shares minted.
    pub fn deposit(&mut self, account: &AccountId, amount: u64, now: u64) -> Result<u64> {
        if amount == 0 {
            return Err(LiquidStakingError::ZeroAmount);
        }

        // order matters, accrue under the current supply before minting
        let accrual = self.accrued(now)?;
        let stake_account = self.settled_account(account, &accrual)?;
        let pool_balance = self.pool.balance();

        let active_stake = calc_underlying_for_shares(pool_balance, stake_account.shares)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        let resulting_stake = active_stake
            .checked_add(amount)
            .ok_or(LiquidStakingError::OutOfBounds)?;
        if !self.pool.config.is_within_bounds(resulting_stake) {
            return Err(LiquidStakingError::OutOfBounds);
        }

        let to_mint = calc_shares_to_mint(pool_balance, amount)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        if to_mint == 0 {
            return Err(LiquidStakingError::ZeroAmount);
        }

        let vault = self.pool.vault.deposit(amount)?;
        let shares = self.pool.shares.mint(to_mint)?;
        let new_balance = stake_account
            .shares
            .checked_add(to_mint)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        let stake_account = stake_account.with_shares(new_balance, accrual.acc_reward_per_share)?;

        self.commit_accrual(accrual);
        self.pool.vault = vault;
        self.pool.shares = shares;
        self.store_account(account, stake_account);
        self.emit(LedgerEvent {
            operation: Operation::Deposit,
            account: account.clone(),
            amounts: EventAmounts {
                underlying: amount,
                shares: to_mint,
                reward: 0,
            },
            timestamp: now,
            unlock_time: None,
        });
        Ok(to_mint)
    }
}

#[cfg(test)]
mod tests {
    use liquid_staking_interface::PoolConfig;

    use crate::ledger::test_utils::*;

    use super::*;

    #[test]
    fn first_deposit_mints_one_to_one() {
        let mut ledger = ledger();
        assert_eq!(ledger.deposit(&alice(), 1_000, 0), Ok(1_000));

        let state = ledger.pool_state();
        assert_eq!(state.total_shares, 1_000);
        assert_eq!(state.total_underlying, 1_000);
        assert_eq!(state.acc_reward_per_share, 0);
        assert_eq!(ledger.stake_account(&alice()).unwrap().shares, 1_000);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.deposit(&alice(), 0, 0),
            Err(LiquidStakingError::ZeroAmount)
        );
    }

    #[test]
    fn first_deposit_below_min_stake_is_out_of_bounds() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.deposit(&alice(), 999, 0),
            Err(LiquidStakingError::OutOfBounds)
        );
        assert!(ledger.events().is_empty());
        assert_eq!(ledger.pool_state().total_underlying, 0);
    }

    #[test]
    fn topping_up_past_max_stake_is_out_of_bounds() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 60_000, 0).unwrap();
        assert_eq!(
            ledger.deposit(&alice(), 40_001, 1),
            Err(LiquidStakingError::OutOfBounds)
        );
        assert_eq!(ledger.deposit(&alice(), 40_000, 1), Ok(40_000));
    }

    #[test]
    fn small_top_up_counts_existing_stake_towards_min() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        assert_eq!(ledger.deposit(&alice(), 1, 1), Ok(1));
    }

    #[test]
    fn failed_deposit_does_not_advance_accumulator() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        let before = ledger.pool_state();
        assert_eq!(
            ledger.deposit(&bob(), 10, 100),
            Err(LiquidStakingError::OutOfBounds)
        );
        assert_eq!(ledger.pool_state(), before);
    }

    #[test]
    fn later_depositor_does_not_share_earlier_rewards() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&bob(), 1_000, 10).unwrap();

        // alice alone for 10s, then split evenly for 10s
        assert_eq!(ledger.claim_reward(&alice(), 20), Ok(1_500));
        assert_eq!(ledger.claim_reward(&bob(), 20), Ok(500));
    }

    #[test]
    fn deposit_settles_prior_reward() {
        let mut ledger = ledger_with(PoolConfig {
            min_stake: 1,
            ..Default::default()
        });
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&alice(), 1_000, 5).unwrap();

        let account = ledger.stake_account(&alice()).unwrap();
        assert_eq!(account.unclaimed_reward, 500);
        assert_eq!(account.shares, 2_000);
    }

    #[test]
    fn clock_regression_is_rejected() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 10).unwrap();
        assert_eq!(
            ledger.deposit(&bob(), 1_000, 9),
            Err(LiquidStakingError::ClockRegression)
        );
    }
}
