use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::AccountId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    Deposit,
    RequestRedeem,
    CancelRedeem,
    ClaimRedeem,
    ClaimReward,
    SetConfig,
    SetConfigAuthority,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::RequestRedeem => "request_redeem",
            Self::CancelRedeem => "cancel_redeem",
            Self::ClaimRedeem => "claim_redeem",
            Self::ClaimReward => "claim_reward",
            Self::SetConfig => "set_config",
            Self::SetConfigAuthority => "set_config_authority",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amounts moved by a single operation. Fields an operation does not touch are 0
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventAmounts {
    /// Underlying deposited, earmarked, released or paid out
    pub underlying: u64,

    /// Shares minted, locked, restored or burnt
    pub shares: u64,

    /// Reward units paid out
    pub reward: u128,
}

/// Record emitted for every committed mutating call
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerEvent {
    pub operation: Operation,
    pub account: AccountId,
    pub amounts: EventAmounts,
    pub timestamp: u64,
    /// Set for redemption requests only
    pub unlock_time: Option<u64>,
}
