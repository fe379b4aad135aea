use std::{collections::BTreeSet, fs, sync::Arc};

use anyhow::Context;
use liquid_staking::{
    AccountId, LiquidStakingError, ManualClock, Operation, PoolConfig, SharedLedger,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub type ScriptLedger = SharedLedger<Arc<ManualClock>>;

/// One timed call in a simulation script. Example step:
/// `{ "at": 10, "op": "deposit", "account": "alice", "amount": 1000 }`
#[derive(Debug, Deserialize)]
pub struct ScriptStep {
    pub at: u64,
    #[serde(flatten)]
    pub op: ScriptOp,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    Deposit {
        account: AccountId,
        amount: u64,
    },
    RequestRedeem {
        account: AccountId,
        amount_shares: u64,
    },
    CancelRedeem {
        account: AccountId,
    },
    ClaimRedeem {
        account: AccountId,
    },
    ClaimReward {
        account: AccountId,
    },
    /// `authority` defaults to `--authority`
    SetConfig {
        config: PoolConfig,
        #[serde(default)]
        authority: Option<AccountId>,
    },
    SetConfigAuthority {
        new_authority: AccountId,
        #[serde(default)]
        authority: Option<AccountId>,
    },
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub at: u64,
    pub operation: Operation,
    pub account: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScriptOp {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Deposit { .. } => Operation::Deposit,
            Self::RequestRedeem { .. } => Operation::RequestRedeem,
            Self::CancelRedeem { .. } => Operation::CancelRedeem,
            Self::ClaimRedeem { .. } => Operation::ClaimRedeem,
            Self::ClaimReward { .. } => Operation::ClaimReward,
            Self::SetConfig { .. } => Operation::SetConfig,
            Self::SetConfigAuthority { .. } => Operation::SetConfigAuthority,
        }
    }

    /// The calling account, or the config authority for reconfiguration
    pub fn account(&self, default_authority: &AccountId) -> AccountId {
        match self {
            Self::Deposit { account, .. }
            | Self::RequestRedeem { account, .. }
            | Self::CancelRedeem { account }
            | Self::ClaimRedeem { account }
            | Self::ClaimReward { account } => account.clone(),
            Self::SetConfig { authority, .. } | Self::SetConfigAuthority { authority, .. } => {
                authority.clone().unwrap_or_else(|| default_authority.clone())
            }
        }
    }

    /// The staker this step acts for. None for reconfiguration
    pub fn staker(&self) -> Option<&AccountId> {
        match self {
            Self::Deposit { account, .. }
            | Self::RequestRedeem { account, .. }
            | Self::CancelRedeem { account }
            | Self::ClaimRedeem { account }
            | Self::ClaimReward { account } => Some(account),
            Self::SetConfig { .. } | Self::SetConfigAuthority { .. } => None,
        }
    }

    fn apply(
        &self,
        ledger: &ScriptLedger,
        account: &AccountId,
    ) -> Result<String, LiquidStakingError> {
        Ok(match self {
            Self::Deposit { amount, .. } => {
                format!("minted {} shares", ledger.deposit(account, *amount)?)
            }
            Self::RequestRedeem { amount_shares, .. } => {
                let request = ledger.request_redeem(account, *amount_shares)?;
                format!(
                    "locked {} shares for {} underlying, unlocks at {}",
                    request.amount_shares, request.underlying_owed, request.unlock_time
                )
            }
            Self::CancelRedeem { .. } => {
                format!("restored {} shares", ledger.cancel_redeem(account)?)
            }
            Self::ClaimRedeem { .. } => {
                format!("paid {} underlying", ledger.claim_redeem(account)?)
            }
            Self::ClaimReward { .. } => {
                format!("paid {} reward", ledger.claim_reward(account)?)
            }
            Self::SetConfig { config, .. } => {
                ledger.set_config(account, *config)?;
                format!(
                    "rate {}/s, stake bounds [{}, {}], cooldown {}s",
                    config.reward_rate_per_second,
                    config.min_stake,
                    config.max_stake,
                    config.cooldown_period
                )
            }
            Self::SetConfigAuthority { new_authority, .. } => {
                ledger.set_config_authority(account, new_authority.clone())?;
                format!("config authority is now {}", new_authority)
            }
        })
    }
}

pub fn load_script(path: &str) -> anyhow::Result<Vec<ScriptStep>> {
    let script = fs::read_to_string(path).with_context(|| format!("reading script {}", path))?;
    serde_json::from_str(&script).with_context(|| format!("parsing script {}", path))
}

/// Every staker named in `steps`, sorted
pub fn stakers(steps: &[ScriptStep]) -> BTreeSet<AccountId> {
    steps
        .iter()
        .filter_map(|step| step.op.staker().cloned())
        .collect()
}

/// Runs every step at its `at` time. A failing step is reported and the replay carries on.
pub fn replay(ledger: &ScriptLedger, steps: &[ScriptStep], authority: &AccountId) -> Vec<StepReport> {
    steps
        .iter()
        .map(|step| {
            ledger.clock().set(step.at);
            let account = step.op.account(authority);
            let operation = step.op.operation();
            debug!(at = step.at, %operation, %account, "replaying step");
            let (output, error) = match step.op.apply(ledger, &account) {
                Ok(output) => (Some(output), None),
                Err(err) => (None, Some(err.to_string())),
            };
            StepReport {
                at: step.at,
                operation,
                account,
                output,
                error,
            }
        })
        .collect()
}
