mod accrual;
mod pool;
mod redemption;
mod share_ledger;
mod stake_account;
mod vault;

pub use accrual::*;
pub use pool::*;
pub use redemption::*;
pub use share_ledger::*;
pub use stake_account::*;
pub use vault::*;
