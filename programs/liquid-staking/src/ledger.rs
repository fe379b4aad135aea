use std::{collections::HashMap, io};

use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_interface::{
    AccountId, AccountView, LedgerEvent, PoolConfig, PoolState, StakingSummary,
};
use liquid_staking_lib::calc_underlying_for_shares;
use tracing::debug;

use crate::{
    errors::{LiquidStakingError, Result},
    state::{Pool, RewardAccrual, StakeAccount},
};

/// A liquid staking pool and every account staked in it.
///
/// Every mutating entry point takes the caller's `now` and
/// 1. advances the reward accumulator to `now` under the current share supply,
/// 2. validates and computes every effect of the call,
/// 3. commits the pool, the caller's account and the emitted event together.
///
/// A call that fails leaves the ledger untouched.
#[derive(BorshDeserialize, BorshSerialize, Clone, Debug)]
pub struct LiquidStaking {
    pub(crate) pool: Pool,
    pub(crate) accounts: HashMap<AccountId, StakeAccount>,
    /// Every committed call appends here until [`Self::take_events`] drains it.
    /// Nothing else ever shrinks it
    #[borsh_skip]
    pub(crate) events: Vec<LedgerEvent>,
}

impl LiquidStaking {
    pub fn new(config: PoolConfig, config_authority: AccountId, now: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pool: Pool::new(config, config_authority, now),
            accounts: HashMap::new(),
            events: Vec::new(),
        })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn config(&self) -> &PoolConfig {
        &self.pool.config
    }

    pub fn config_authority(&self) -> &AccountId {
        &self.pool.config_authority
    }

    pub fn pool_state(&self) -> PoolState {
        self.pool.state()
    }

    pub fn stake_account(&self, id: &AccountId) -> Option<&StakeAccount> {
        self.accounts.get(id)
    }

    /// The account as of `now`, including reward accrued since its last
    /// settlement. Does not mutate the ledger.
    ///
    /// Returns None for accounts that never deposited or have been fully drained.
    pub fn account(&self, id: &AccountId, now: u64) -> Result<Option<AccountView>> {
        let Some(stake_account) = self.accounts.get(id) else {
            return Ok(None);
        };
        let accrual = self.accrued(now)?;
        let settled = stake_account.settle(accrual.acc_reward_per_share)?;
        let active_stake = calc_underlying_for_shares(self.pool.balance(), settled.shares)
            .ok_or(LiquidStakingError::ArithmeticOverflow)?;
        Ok(Some(AccountView {
            shares: settled.shares,
            active_stake,
            unclaimed_reward: settled.unclaimed_reward,
            pending_redemption: settled.pending_redemption.map(|r| r.view()),
        }))
    }

    pub fn staking_summary(&self, now: u64) -> Result<StakingSummary> {
        let accrual = self.accrued(now)?;
        Ok(StakingSummary {
            total_staked: self.pool.vault.active_underlying(),
            total_locked: self.pool.vault.locked_underlying,
            total_accounts: self.accounts.len() as u64,
            pending_redemptions: self.pool.pending_redemptions,
            reward_rate_per_second: self.pool.config.reward_rate_per_second,
            acc_reward_per_share: accrual.acc_reward_per_share,
            total_rewards_emitted: accrual.total_rewards_emitted,
            total_rewards_paid: self.pool.total_rewards_paid,
            as_of: now,
        })
    }

    /// Events emitted since the last call, oldest first.
    ///
    /// The buffer is unbounded: a long-lived ledger must be drained
    /// periodically or it keeps one event per committed call in memory.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Borsh encoding of the pool and every account. Buffered events are not included
    pub fn snapshot(&self) -> io::Result<Vec<u8>> {
        self.try_to_vec()
    }

    /// Decodes a [`Self::snapshot`], rejecting one whose pool totals disagree with its accounts
    pub fn from_snapshot(bytes: &[u8]) -> io::Result<Self> {
        let ledger = Self::try_from_slice(bytes)?;
        ledger
            .check_consistency()
            .map_err(|reason| io::Error::new(io::ErrorKind::InvalidData, reason))?;
        Ok(ledger)
    }

    fn check_consistency(&self) -> std::result::Result<(), &'static str> {
        if !self.pool.config.is_valid() {
            return Err("invalid pool config");
        }
        let vault = &self.pool.vault;
        if vault.locked_underlying > vault.total_underlying {
            return Err("locked underlying exceeds total underlying");
        }
        // u128 sums so corrupt balances cannot overflow
        let (mut shares, mut locked_shares, mut owed, mut pending) = (0u128, 0u128, 0u128, 0u64);
        for account in self.accounts.values() {
            shares += u128::from(account.shares);
            if let Some(request) = account.pending_redemption {
                locked_shares += u128::from(request.amount_shares);
                owed += u128::from(request.underlying_owed);
                pending += 1;
            }
        }
        if shares != u128::from(self.pool.shares.total_shares) {
            return Err("account shares do not sum to total shares");
        }
        if locked_shares != u128::from(self.pool.shares.locked_shares) {
            return Err("pending redemptions do not sum to locked shares");
        }
        if owed != u128::from(vault.locked_underlying) {
            return Err("pending redemptions do not sum to locked underlying");
        }
        if pending != self.pool.pending_redemptions {
            return Err("pending redemption count mismatch");
        }
        Ok(())
    }

    pub(crate) fn accrued(&self, now: u64) -> Result<RewardAccrual> {
        self.pool.accrual.accrued(
            self.pool.config.reward_rate_per_second,
            self.pool.shares.total_shares,
            now,
        )
    }

    /// The caller's account settled against `accrual`. Unknown accounts start empty
    pub(crate) fn settled_account(
        &self,
        id: &AccountId,
        accrual: &RewardAccrual,
    ) -> Result<StakeAccount> {
        self.accounts
            .get(id)
            .copied()
            .unwrap_or_default()
            .settle(accrual.acc_reward_per_share)
    }

    pub(crate) fn commit_accrual(&mut self, accrual: RewardAccrual) {
        if accrual.acc_reward_per_share != self.pool.accrual.acc_reward_per_share {
            debug!(
                acc_reward_per_share = accrual.acc_reward_per_share,
                emitted = accrual.total_rewards_emitted - self.pool.accrual.total_rewards_emitted,
                last_accrual_time = accrual.last_accrual_time,
                "accrued"
            );
        }
        self.pool.accrual = accrual;
    }

    pub(crate) fn store_account(&mut self, id: &AccountId, stake_account: StakeAccount) {
        if stake_account.is_empty() {
            self.accounts.remove(id);
        } else {
            self.accounts.insert(id.clone(), stake_account);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use liquid_staking_interface::{AccountId, PoolConfig};

    use super::LiquidStaking;

    pub fn owner() -> AccountId {
        AccountId::from("owner")
    }

    pub fn alice() -> AccountId {
        AccountId::from("alice")
    }

    pub fn bob() -> AccountId {
        AccountId::from("bob")
    }

    /// rate 100/s, stake bounds [1000, 100000], 1 day cooldown, created at t=0
    pub fn ledger() -> LiquidStaking {
        LiquidStaking::new(PoolConfig::default(), owner(), 0).unwrap()
    }

    pub fn ledger_with(config: PoolConfig) -> LiquidStaking {
        LiquidStaking::new(config, owner(), 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::{test_utils::*, *};

    #[test]
    fn invalid_config_is_rejected() {
        let config = PoolConfig {
            min_stake: 10,
            max_stake: 5,
            ..Default::default()
        };
        assert_eq!(
            LiquidStaking::new(config, owner(), 0).unwrap_err(),
            LiquidStakingError::InvalidConfig
        );
    }

    #[test]
    fn unknown_account_has_no_view() {
        assert_eq!(ledger().account(&alice(), 0), Ok(None));
    }

    #[test]
    fn view_reports_unsettled_reward_without_mutating() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        let before = ledger.pool_state();

        let view = ledger.account(&alice(), 7).unwrap().unwrap();
        assert_eq!(view.unclaimed_reward, 700);
        assert_eq!(view.active_stake, 1_000);
        assert_eq!(ledger.pool_state(), before);
    }

    #[test]
    fn queries_reject_clock_regression() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 50).unwrap();
        assert_eq!(
            ledger.account(&alice(), 49),
            Err(LiquidStakingError::ClockRegression)
        );
        assert_eq!(
            ledger.staking_summary(49),
            Err(LiquidStakingError::ClockRegression)
        );
    }

    #[test]
    fn summary_tracks_emission_and_payouts() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&bob(), 3_000, 0).unwrap();
        ledger.claim_reward(&alice(), 20).unwrap();
        ledger.request_redeem(&bob(), 1_000, 20).unwrap();

        let summary = ledger.staking_summary(30).unwrap();
        assert_eq!(summary.total_staked, 3_000);
        assert_eq!(summary.total_locked, 1_000);
        assert_eq!(summary.total_accounts, 2);
        assert_eq!(summary.pending_redemptions, 1);
        assert_eq!(summary.total_rewards_emitted, 3_000);
        assert_eq!(summary.total_rewards_paid, 500);
    }

    #[test]
    fn snapshot_restores_pool_and_accounts() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.deposit(&bob(), 2_000, 5).unwrap();
        ledger.request_redeem(&bob(), 500, 8).unwrap();

        let mut restored = LiquidStaking::from_snapshot(&ledger.snapshot().unwrap()).unwrap();
        assert_eq!(restored.pool(), ledger.pool());
        assert!(restored.events().is_empty());
        assert_eq!(restored.account(&bob(), 9), ledger.account(&bob(), 9));
        assert_eq!(
            restored.claim_reward(&alice(), 20),
            ledger.claim_reward(&alice(), 20)
        );
    }

    #[test]
    fn snapshot_with_inconsistent_totals_is_rejected() {
        let mut ledger = ledger();
        ledger.deposit(&alice(), 1_000, 0).unwrap();
        ledger.request_redeem(&alice(), 400, 1).unwrap();

        let mut overlocked = ledger.clone();
        overlocked.pool.vault.locked_underlying = overlocked.pool.vault.total_underlying + 1;
        let err = LiquidStaking::from_snapshot(&overlocked.snapshot().unwrap()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let mut minted = ledger.clone();
        minted.pool.shares.total_shares += 1;
        assert!(LiquidStaking::from_snapshot(&minted.snapshot().unwrap()).is_err());

        let mut orphaned = ledger.clone();
        orphaned.pool.pending_redemptions = 0;
        assert!(LiquidStaking::from_snapshot(&orphaned.snapshot().unwrap()).is_err());

        assert!(LiquidStaking::from_snapshot(&[1, 2, 3]).is_err());
        assert!(LiquidStaking::from_snapshot(&ledger.snapshot().unwrap()).is_ok());
    }

    #[test]
    fn events_accumulate_until_taken() {
        let mut ledger = ledger();
        for t in 0..5 {
            ledger.deposit(&alice(), 1_000, t).unwrap();
        }
        assert!(ledger.deposit(&alice(), 0, 5).is_err());
        assert_eq!(ledger.events().len(), 5);

        let taken = ledger.take_events();
        assert_eq!(taken.len(), 5);
        assert!(taken.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(ledger.events().is_empty());
        ledger.claim_reward(&alice(), 6).unwrap();
        assert_eq!(ledger.events().len(), 1);
    }
}
