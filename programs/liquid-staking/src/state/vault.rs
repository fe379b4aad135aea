use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::{LiquidStakingError, Result};

/// Custodied underlying.
///
/// Invariant: `locked_underlying <= total_underlying`, so every pending
/// redemption is always fully backed.
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssetVault {
    /// All deposited underlying that has not been paid out yet,
    /// including the part earmarked for pending redemptions
    pub total_underlying: u64,

    /// Underlying owed to pending redemptions, valued at lock time
    pub locked_underlying: u64,
}

impl AssetVault {
    /// Underlying backing the active shares
    pub fn active_underlying(&self) -> u64 {
        self.total_underlying - self.locked_underlying
    }

    pub fn deposit(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            total_underlying: self
                .total_underlying
                .checked_add(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }

    /// Earmarks `amount` of the active underlying for a redemption
    pub fn lock(&self, amount: u64) -> Result<Self> {
        if amount > self.active_underlying() {
            return Err(LiquidStakingError::ArithmeticOverflow);
        }
        Ok(Self {
            locked_underlying: self.locked_underlying + amount,
            ..*self
        })
    }

    /// Returns earmarked underlying to the active pool
    pub fn unlock(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            locked_underlying: self
                .locked_underlying
                .checked_sub(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }

    /// Pays earmarked underlying out of the vault
    pub fn withdraw_locked(&self, amount: u64) -> Result<Self> {
        let unlocked = self.unlock(amount)?;
        Ok(Self {
            // locked <= total so this cannot underflow once unlock succeeded
            total_underlying: unlocked.total_underlying - amount,
            ..unlocked
        })
    }
}
