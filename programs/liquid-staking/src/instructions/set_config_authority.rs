use liquid_staking_interface::{AccountId, EventAmounts, LedgerEvent, Operation};

use crate::{errors::Result, LiquidStaking};

impl LiquidStaking {
    /// Hands the config authority over to `new_authority`.
    /// Double check `new_authority`: a typo here locks the pool configuration forever.
    pub fn set_config_authority(
        &mut self,
        authority: &AccountId,
        new_authority: AccountId,
        now: u64,
    ) -> Result<()> {
        self.ensure_config_authority(authority)?;
        let accrual = self.accrued(now)?;

        self.commit_accrual(accrual);
        self.pool.config_authority = new_authority;
        self.emit(LedgerEvent {
            operation: Operation::SetConfigAuthority,
            account: authority.clone(),
            amounts: EventAmounts::default(),
            timestamp: now,
            unlock_time: None,
        });
        Ok(())
    }
}
