use crate::mul_div_floor;

/// Fixed-point scale of `acc_reward_per_share`
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccrualArgs {
    pub acc_reward_per_share: u128,
    pub last_accrual_time: u64,
    pub reward_rate_per_second: u64,
    pub total_shares: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Accrued {
    pub acc_reward_per_share: u128,
    pub last_accrual_time: u64,
    /// Reward units emitted over the accrued interval. 0 if there were no shares to earn them
    pub emitted: u128,
}

/// Advances the accumulator to `now`.
///
/// Returns None if `now` is before `last_accrual_time` or on overflow.
pub fn calc_accrued(
    AccrualArgs {
        acc_reward_per_share,
        last_accrual_time,
        reward_rate_per_second,
        total_shares,
    }: AccrualArgs,
    now: u64,
) -> Option<Accrued> {
    let elapsed = now.checked_sub(last_accrual_time)?;
    // no shares: time moves on, nothing is emitted for the interval
    if elapsed == 0 || total_shares == 0 {
        return Some(Accrued {
            acc_reward_per_share,
            last_accrual_time: now,
            emitted: 0,
        });
    }
    // u64 * u64 always fits in u128
    let emitted = u128::from(elapsed) * u128::from(reward_rate_per_second);
    let increment = mul_div_floor(emitted, PRECISION, total_shares.into())?;
    Some(Accrued {
        acc_reward_per_share: acc_reward_per_share.checked_add(increment)?,
        last_accrual_time: now,
        emitted,
    })
}

/// floor(shares * acc_reward_per_share / PRECISION), the reward debt of a freshly settled balance
pub fn calc_reward_debt(shares: u64, acc_reward_per_share: u128) -> Option<u128> {
    mul_div_floor(acc_reward_per_share, shares.into(), PRECISION)
}

/// Reward earned by `shares` since the settlement that recorded `reward_debt`
pub fn calc_pending_reward(shares: u64, acc_reward_per_share: u128, reward_debt: u128) -> Option<u128> {
    calc_reward_debt(shares, acc_reward_per_share)?.checked_sub(reward_debt)
}
