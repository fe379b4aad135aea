use liquid_staking_interface::Rational;
use spl_math::uint::U256;

pub trait RationalQty {
    fn is_valid(&self) -> bool;

    fn floor_mul(&self, value: u64) -> Option<u64>;

    /// `self >= other`, compared without loss of precision
    fn is_gte(&self, other: &Self) -> bool;
}

impl<T: RationalQty + ?Sized> RationalQty for &T {
    fn is_valid(&self) -> bool {
        (*self).is_valid()
    }

    fn floor_mul(&self, value: u64) -> Option<u64> {
        (*self).floor_mul(value)
    }

    fn is_gte(&self, other: &Self) -> bool {
        (*self).is_gte(other)
    }
}

impl RationalQty for Rational {
    fn is_valid(&self) -> bool {
        self.denom != 0
    }

    fn floor_mul(&self, value: u64) -> Option<u64> {
        u128::from(value)
            .checked_mul(self.num.into())
            .and_then(|product| product.checked_div(self.denom.into()))
            .and_then(|result| result.try_into().ok())
    }

    fn is_gte(&self, other: &Self) -> bool {
        // u64 * u64 always fits in u128
        u128::from(self.num) * u128::from(other.denom)
            >= u128::from(other.num) * u128::from(self.denom)
    }
}

/// floor(a * b / denom), with `a * b` computed in 256 bits.
///
/// Returns None if denom = 0 or the result does not fit in a u128.
pub fn mul_div_floor(a: u128, b: u128, denom: u128) -> Option<u128> {
    let result = U256::from(a)
        .checked_mul(U256::from(b))?
        .checked_div(U256::from(denom))?;
    (result <= U256::from(u128::MAX)).then(|| result.as_u128())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    prop_compose! {
        fn valid_ratios()
            (denom in 1..=u64::MAX, num in any::<u64>()) -> Rational {
                Rational { num, denom }
            }
    }

    proptest! {
        #[test]
        fn floor_mul_rounds_down(ratio in valid_ratios(), value: u64) {
            if let Some(floor) = ratio.floor_mul(value) {
                let exact_num = u128::from(value) * u128::from(ratio.num);
                let floor_num = u128::from(floor) * u128::from(ratio.denom);
                prop_assert!(floor_num <= exact_num);
                prop_assert!(exact_num - floor_num < u128::from(ratio.denom));
            }
        }
    }

    proptest! {
        #[test]
        fn mul_div_floor_matches_narrow_product(a: u64, b: u64, denom in 1..=u64::MAX) {
            let expected = u128::from(a) * u128::from(b) / u128::from(denom);
            prop_assert_eq!(
                mul_div_floor(a.into(), b.into(), denom.into()),
                Some(expected)
            );
        }
    }

    #[test]
    fn mul_div_floor_handles_wide_product() {
        // 1e20 * 1e18 overflows u128 but the quotient does not
        let emitted: u128 = 100_000_000_000_000_000_000;
        let precision: u128 = 1_000_000_000_000_000_000;
        assert_eq!(
            mul_div_floor(emitted, precision, 1_000_000_000_000_000_000),
            Some(emitted)
        );
        assert_eq!(mul_div_floor(1, 1, 0), None);
    }

    #[test]
    fn mul_div_floor_exact_when_remainder_times_factor_is_wide() {
        assert_eq!(
            mul_div_floor(u128::MAX - 1, u128::MAX, u128::MAX),
            Some(u128::MAX - 1)
        );
        let near_2_64 = u128::from(u64::MAX);
        assert_eq!(
            mul_div_floor(near_2_64 * 3 - 1, near_2_64 + 7, near_2_64),
            Some(3 * near_2_64 + 19)
        );
        assert_eq!(mul_div_floor(u128::MAX, 2, 1), None);
    }

    #[test]
    fn is_gte_compares_cross_products() {
        let one = Rational { num: 3, denom: 3 };
        let above = Rational { num: 1001, denom: 1000 };
        assert!(above.is_gte(&one));
        assert!(one.is_gte(&one));
        assert!(!one.is_gte(&above));
    }
}
