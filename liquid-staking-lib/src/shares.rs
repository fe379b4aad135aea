use liquid_staking_interface::Rational;

use crate::RationalQty;

/// The part of the vault backing active shares, i.e. excluding underlying
/// earmarked for pending redemptions
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolBalance {
    pub active_underlying: u64,
    pub total_shares: u64,
}

impl PoolBalance {
    /// Underlying per share. None if there are no shares to price
    pub fn share_price(&self) -> Option<Rational> {
        let price = Rational {
            num: self.active_underlying,
            denom: self.total_shares,
        };
        price.is_valid().then_some(price)
    }
}

pub fn calc_shares_to_mint(
    PoolBalance {
        active_underlying,
        total_shares,
    }: PoolBalance,
    amount_to_add: u64,
) -> Option<u64> {
    // 0-edge cases: the next depositor sets a 1:1 baseline
    // 0 supply: first deposit, or every share has been locked or burnt
    // 0 underlying with non-zero supply: unreachable since rounding always favours the pool
    if total_shares == 0 || active_underlying == 0 {
        return Some(amount_to_add);
    }
    // mint = amount * supply BEFORE DEPOSIT / active underlying BEFORE DEPOSIT
    Rational {
        num: total_shares,
        denom: active_underlying,
    }
    .floor_mul(amount_to_add)
}

pub fn calc_underlying_for_shares(pool_balance: PoolBalance, shares: u64) -> Option<u64> {
    // 0 edge-case: no shares to price, worth 0
    match pool_balance.share_price() {
        None => Some(0),
        // value = shares * active underlying BEFORE LOCK / supply BEFORE LOCK
        Some(price) => price.floor_mul(shares),
    }
}
