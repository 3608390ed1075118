/// Most decimal places the planner accepts for quantities and prices.
pub const MAX_PRECISION: u32 = 15;

/// Round `value` to `decimals` places: scale by `10^decimals`, round to the
/// nearest integer with ties away from zero, then scale back.
///
/// Every quantity and price the planner emits goes through this function, so
/// displayed numbers and test expectations agree exactly. When the scaled
/// value is not representable the input is returned unrounded.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let Ok(exp) = i32::try_from(decimals) else {
        return value;
    };
    let p = 10f64.powi(exp);
    let scaled = value * p;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / p
}

pub fn round2(x: f64) -> f64 {
    round_to(x, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_requested_places() {
        assert_eq!(round_to(68.29787, 1), 68.3);
        assert_eq!(round_to(204.893617, 1), 204.9);
        assert_eq!(round_to(4655.556734992679, 4), 4655.5567);
        assert_eq!(round_to(12.5, 0), 13.0);
    }

    #[test]
    fn ties_go_away_from_zero() {
        assert_eq!(round_to(0.5, 0), 1.0);
        assert_eq!(round_to(-0.5, 0), -1.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(0.25, 1), 0.3);
    }

    #[test]
    fn zero_decimals_is_integer_rounding() {
        assert_eq!(round_to(341.49, 0), 341.0);
        assert_eq!(round_to(-341.51, 0), -342.0);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn oversized_precision_leaves_value_unrounded() {
        assert_eq!(round_to(12.34, u32::MAX), 12.34);
        assert_eq!(round_to(12.34, 400), 12.34);
        assert_eq!(round_to(1.5e307, 2), 1.5e307);
        assert_eq!(round_to(0.5, MAX_PRECISION), 0.5);
    }

    #[test]
    fn round2_helper() {
        assert_eq!(round2(6773.1000000001), 6773.1);
        assert_eq!(round2(2.1100000000000003), 2.11);
    }
}
