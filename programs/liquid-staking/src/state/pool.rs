use borsh::{BorshDeserialize, BorshSerialize};
use liquid_staking_interface::{AccountId, PoolConfig, PoolState};
use liquid_staking_lib::PoolBalance;

use crate::state::{AssetVault, RewardAccrual, ShareLedger};

#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct Pool {
    /// The authority authorized to replace `config`
    pub config_authority: AccountId,

    pub config: PoolConfig,

    pub vault: AssetVault,

    pub shares: ShareLedger,

    pub accrual: RewardAccrual,

    /// Reward units paid out through claim_reward since inception
    pub total_rewards_paid: u128,

    /// Number of accounts with a pending redemption request
    pub pending_redemptions: u64,
}

impl Pool {
    pub fn new(config: PoolConfig, config_authority: AccountId, now: u64) -> Self {
        Self {
            config_authority,
            config,
            vault: AssetVault::default(),
            shares: ShareLedger::default(),
            accrual: RewardAccrual::new(now),
            total_rewards_paid: 0,
            pending_redemptions: 0,
        }
    }

    pub fn balance(&self) -> PoolBalance {
        self.shares.pool_balance(&self.vault)
    }

    pub fn state(&self) -> PoolState {
        PoolState {
            config: self.config,
            config_authority: self.config_authority.clone(),
            total_shares: self.shares.total_shares,
            locked_shares: self.shares.locked_shares,
            total_underlying: self.vault.total_underlying,
            locked_underlying: self.vault.locked_underlying,
            acc_reward_per_share: self.accrual.acc_reward_per_share,
            last_accrual_time: self.accrual.last_accrual_time,
        }
    }
}
