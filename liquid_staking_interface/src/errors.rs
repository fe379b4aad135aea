use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, FromPrimitive, PartialEq)]
pub enum LiquidStakingError {
    #[error("Resulting active stake is outside the pool's minimum/maximum stake bounds")]
    OutOfBounds = 6000,

    #[error("Not enough active shares to redeem")]
    InsufficientShares = 6001,

    #[error("A redemption request is already pending for this account")]
    AlreadyPending = 6002,

    #[error("No pending redemption request for this account")]
    NotFound = 6003,

    #[error("Redemption request is still cooling down")]
    TooEarly = 6004,

    #[error("Provided time is earlier than the pool's last accrual time")]
    ClockRegression = 6005,

    #[error("Amount must be non-zero")]
    ZeroAmount = 6006,

    #[error("Pool configuration is invalid")]
    InvalidConfig = 6007,

    #[error("The provided authority is not the pool's config authority")]
    InvalidConfigAuthority = 6008,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow = 6009,
}

impl LiquidStakingError {
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl From<LiquidStakingError> for u32 {
    fn from(e: LiquidStakingError) -> Self {
        e.code()
    }
}

impl TryFrom<u32> for LiquidStakingError {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        Self::from_u32(code).ok_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for e in [
            LiquidStakingError::OutOfBounds,
            LiquidStakingError::TooEarly,
            LiquidStakingError::ArithmeticOverflow,
        ] {
            assert_eq!(LiquidStakingError::try_from(e.code()), Ok(e));
        }
        assert_eq!(LiquidStakingError::try_from(42), Err(42));
    }
}
