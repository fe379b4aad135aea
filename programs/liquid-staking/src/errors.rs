pub use liquid_staking_interface::LiquidStakingError;

pub type Result<T> = std::result::Result<T, LiquidStakingError>;
