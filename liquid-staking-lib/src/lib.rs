mod accrual;
mod rational;
mod shares;

pub use accrual::*;
pub use rational::*;
pub use shares::*;
