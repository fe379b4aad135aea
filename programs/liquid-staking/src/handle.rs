//! Process-wide access to a single ledger.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};

use liquid_staking_interface::{
    AccountId, AccountView, LedgerEvent, PoolConfig, PoolState, RedemptionView, StakingSummary,
};
use parking_lot::RwLock;
use tracing::warn;

use crate::{errors::Result, LiquidStaking};

/// Source of the current unix time, in seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // a system clock set before 1970 reads as 0 and is rejected as a regression
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self(AtomicU64::new(now))
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Cloneable, thread-safe handle to one [`LiquidStaking`].
///
/// Mutations hold the write lock for the whole call and read the clock while
/// holding it, so calls are applied in timestamp order. Queries hold the read
/// lock and always observe a committed state.
///
/// Events from every clone collect in one unbounded buffer. A long-running
/// owner must call [`Self::take_events`] periodically to release them.
#[derive(Clone, Debug)]
pub struct SharedLedger<C = SystemClock> {
    ledger: Arc<RwLock<LiquidStaking>>,
    clock: C,
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(config: PoolConfig, config_authority: AccountId, clock: C) -> Result<Self> {
        let ledger = LiquidStaking::new(config, config_authority, clock.now())?;
        Ok(Self::from_ledger(ledger, clock))
    }

    pub fn from_ledger(ledger: LiquidStaking, clock: C) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn write<T>(
        &self,
        operation: &str,
        account: &AccountId,
        f: impl FnOnce(&mut LiquidStaking, u64) -> Result<T>,
    ) -> Result<T> {
        let mut ledger = self.ledger.write();
        let now = self.clock.now();
        f(&mut *ledger, now).map_err(|err| {
            warn!(operation, account = %account, now, error = %err, "rejected");
            err
        })
    }

    pub fn deposit(&self, account: &AccountId, amount: u64) -> Result<u64> {
        self.write("deposit", account, |l, now| l.deposit(account, amount, now))
    }

    pub fn request_redeem(&self, account: &AccountId, amount_shares: u64) -> Result<RedemptionView> {
        self.write("request_redeem", account, |l, now| {
            l.request_redeem(account, amount_shares, now)
        })
    }

    pub fn cancel_redeem(&self, account: &AccountId) -> Result<u64> {
        self.write("cancel_redeem", account, |l, now| l.cancel_redeem(account, now))
    }

    pub fn claim_redeem(&self, account: &AccountId) -> Result<u64> {
        self.write("claim_redeem", account, |l, now| l.claim_redeem(account, now))
    }

    pub fn claim_reward(&self, account: &AccountId) -> Result<u128> {
        self.write("claim_reward", account, |l, now| l.claim_reward(account, now))
    }

    pub fn set_config(&self, authority: &AccountId, config: PoolConfig) -> Result<()> {
        self.write("set_config", authority, |l, now| {
            l.set_config(authority, config, now)
        })
    }

    pub fn set_config_authority(&self, authority: &AccountId, new_authority: AccountId) -> Result<()> {
        self.write("set_config_authority", authority, |l, now| {
            l.set_config_authority(authority, new_authority, now)
        })
    }

    pub fn pool_state(&self) -> PoolState {
        self.ledger.read().pool_state()
    }

    pub fn config(&self) -> PoolConfig {
        *self.ledger.read().config()
    }

    pub fn config_authority(&self) -> AccountId {
        self.ledger.read().config_authority().clone()
    }

    pub fn account(&self, id: &AccountId) -> Result<Option<AccountView>> {
        let ledger = self.ledger.read();
        ledger.account(id, self.clock.now())
    }

    pub fn staking_summary(&self) -> Result<StakingSummary> {
        let ledger = self.ledger.read();
        ledger.staking_summary(self.clock.now())
    }

    pub fn take_events(&self) -> Vec<LedgerEvent> {
        self.ledger.write().take_events()
    }

    pub fn snapshot(&self) -> std::io::Result<Vec<u8>> {
        self.ledger.read().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{errors::LiquidStakingError, ledger::test_utils::*};

    use super::*;

    fn shared() -> SharedLedger<Arc<ManualClock>> {
        SharedLedger::new(
            PoolConfig::default(),
            owner(),
            Arc::new(ManualClock::new(0)),
        )
        .unwrap()
    }

    #[test]
    fn reads_time_from_clock() {
        let ledger = shared();
        ledger.deposit(&alice(), 1_000).unwrap();
        ledger.clock().advance(10);
        assert_eq!(ledger.account(&alice()).unwrap().unwrap().unclaimed_reward, 1_000);
        assert_eq!(ledger.claim_reward(&alice()), Ok(1_000));

        let view = ledger.request_redeem(&alice(), 1_000).unwrap();
        assert_eq!(view.unlock_time, 86_410);
        ledger.clock().set(86_409);
        assert_eq!(ledger.claim_redeem(&alice()), Err(LiquidStakingError::TooEarly));
        ledger.clock().set(86_410);
        assert_eq!(ledger.claim_redeem(&alice()), Ok(1_000));
    }

    #[test]
    fn clones_share_one_ledger() {
        let ledger = shared();
        let other = ledger.clone();
        other.deposit(&bob(), 2_000).unwrap();
        assert_eq!(ledger.pool_state().total_shares, 2_000);
        assert_eq!(ledger.take_events().len(), 1);
        assert!(other.take_events().is_empty());

        other.set_config_authority(&owner(), alice()).unwrap();
        assert_eq!(ledger.config_authority(), alice());
        assert_eq!(ledger.config(), PoolConfig::default());

        let restored = LiquidStaking::from_snapshot(&ledger.snapshot().unwrap()).unwrap();
        assert_eq!(restored.pool_state(), other.pool_state());
    }

    #[test]
    fn concurrent_deposits_are_all_applied() {
        let ledger = shared();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let account = AccountId::new(format!("staker-{i}"));
                    for _ in 0..10 {
                        ledger.deposit(&account, 1_000).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let summary = ledger.staking_summary().unwrap();
        assert_eq!(summary.total_staked, 80_000);
        assert_eq!(summary.total_accounts, 8);
        assert_eq!(ledger.take_events().len(), 80);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now() > 0);
    }
}
