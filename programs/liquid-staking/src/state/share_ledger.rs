use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_lib::PoolBalance;

use crate::{
    errors::{LiquidStakingError, Result},
    state::AssetVault,
};

/// Pool-wide supply of the liquid claim token.
/// Per-account balances live on [`crate::state::StakeAccount`].
#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShareLedger {
    /// Active shares. Equals the sum of every account's `shares`
    pub total_shares: u64,

    /// Shares held by pending redemptions. They earn no reward
    pub locked_shares: u64,
}

impl ShareLedger {
    pub fn pool_balance(&self, vault: &AssetVault) -> PoolBalance {
        PoolBalance {
            active_underlying: vault.active_underlying(),
            total_shares: self.total_shares,
        }
    }

    pub fn mint(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            total_shares: self
                .total_shares
                .checked_add(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }

    /// Moves active shares out of the earning supply
    pub fn lock(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            total_shares: self
                .total_shares
                .checked_sub(amount)
                .ok_or(LiquidStakingError::InsufficientShares)?,
            locked_shares: self
                .locked_shares
                .checked_add(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
        })
    }

    /// Moves locked shares back into the earning supply
    pub fn unlock(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            total_shares: self
                .total_shares
                .checked_add(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            locked_shares: self
                .locked_shares
                .checked_sub(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
        })
    }

    pub fn burn_locked(&self, amount: u64) -> Result<Self> {
        Ok(Self {
            locked_shares: self
                .locked_shares
                .checked_sub(amount)
                .ok_or(LiquidStakingError::ArithmeticOverflow)?,
            ..*self
        })
    }
}
