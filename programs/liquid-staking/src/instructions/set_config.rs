use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation, PoolConfig};

use crate::{
    errors::{LiquidStakingError, Result},
    LiquidStaking,
};

impl LiquidStaking {
    /// Replaces the pool configuration. Only the config authority may call this.
    ///
    /// Reward is accrued to `now` under the old rate first, so a rate change is
    /// never retroactive. A new cooldown only applies to requests made afterwards.
    pub fn set_config(&mut self, authority: &AccountId, config: PoolConfig, now: u64) -> Result<()> {
        self.ensure_config_authority(authority)?;
        config.validate()?;
        let accrual = self.accrued(now)?;

        self.commit_accrual(accrual);
        self.pool.config = config;
        self.emit(LedgerEvent {
            operation: Operation::SetConfig,
            account: authority.clone(),
            amounts: EventAmounts::default(),
            timestamp: now,
            unlock_time: None,
        });
        Ok(())
    }

    pub(crate) fn ensure_config_authority(&self, authority: &AccountId) -> Result<()> {
        match authority == &self.pool.config_authority {
            true => Ok(()),
            false => Err(LiquidStakingError::InvalidConfigAuthority),
        }
    }
}
