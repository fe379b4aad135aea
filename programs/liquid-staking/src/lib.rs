pub mod errors;
mod handle;
mod instructions;
mod ledger;
mod log;
pub mod state;

pub use handle::*;
pub use ledger::*;
pub use liquid_staking_interface::{
    AccountId, AccountView, EventAmounts, LedgerEvent, LiquidStakingError, Operation, PoolConfig,
    PoolState, RedemptionView, StakingSummary,
};
