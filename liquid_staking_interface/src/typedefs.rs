use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ratio. Denom should not = 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    pub num: u64,
    pub denom: u64,
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolConfig {
    /// Reward units emitted per second, split across all active shares
    pub reward_rate_per_second: u64,

    /// Lowest active stake, in underlying, an account may hold after a deposit
    pub min_stake: u64,

    /// Highest active stake, in underlying, an account may hold after a deposit
    pub max_stake: u64,

    /// Seconds between a redemption request and the earliest claim
    pub cooldown_period: u64,
}

pub const DEFAULT_REWARD_RATE_PER_SECOND: u64 = 100;
pub const DEFAULT_MIN_STAKE: u64 = 1_000;
pub const DEFAULT_MAX_STAKE: u64 = 100_000;
pub const DEFAULT_COOLDOWN_PERIOD: u64 = 86_400;

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            reward_rate_per_second: DEFAULT_REWARD_RATE_PER_SECOND,
            min_stake: DEFAULT_MIN_STAKE,
            max_stake: DEFAULT_MAX_STAKE,
            cooldown_period: DEFAULT_COOLDOWN_PERIOD,
        }
    }
}

impl PoolConfig {
    pub fn is_valid(&self) -> bool {
        self.max_stake > 0 && self.min_stake <= self.max_stake
    }

    pub fn validate(&self) -> Result<(), crate::LiquidStakingError> {
        match self.is_valid() {
            true => Ok(()),
            false => Err(crate::LiquidStakingError::InvalidConfig),
        }
    }

    pub fn is_within_bounds(&self, active_stake: u64) -> bool {
        (self.min_stake..=self.max_stake).contains(&active_stake)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolState {
    pub config: PoolConfig,
    pub config_authority: AccountId,
    pub total_shares: u64,
    pub locked_shares: u64,
    pub total_underlying: u64,
    pub locked_underlying: u64,
    pub acc_reward_per_share: u128,
    pub last_accrual_time: u64,
}

impl PoolState {
    /// Underlying backing the active (non-locked) shares
    pub fn active_underlying(&self) -> u64 {
        self.total_underlying.saturating_sub(self.locked_underlying)
    }

    /// Underlying per active share. None while the pool has no active shares
    pub fn share_price(&self) -> Option<Rational> {
        match self.total_shares {
            0 => None,
            denom => Some(Rational {
                num: self.active_underlying(),
                denom,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedemptionView {
    pub amount_shares: u64,
    pub underlying_owed: u64,
    pub requested_at: u64,
    pub unlock_time: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountView {
    pub shares: u64,
    /// `shares` valued in underlying at the current share price
    pub active_stake: u64,
    /// Settled plus accrued-but-unsettled reward as of the queried time
    pub unclaimed_reward: u128,
    pub pending_redemption: Option<RedemptionView>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StakingSummary {
    pub total_staked: u64,
    pub total_locked: u64,
    pub total_accounts: u64,
    pub pending_redemptions: u64,
    pub reward_rate_per_second: u64,
    pub acc_reward_per_share: u128,
    pub total_rewards_emitted: u128,
    pub total_rewards_paid: u128,
    pub as_of: u64,
}
