use std::f64::consts::PI;

/// Wraps `angle` into (-PI, PI] with a single 2*PI correction.
///
/// This is not a modulo: an input more than one full turn outside the interval
/// comes back still out of range. Callers only ever add per-tick deltas far
/// smaller than a turn to an already normalized angle.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle <= -PI {
        angle + 2.0 * PI
    } else if angle > PI {
        angle - 2.0 * PI
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_in_range_angles_are_untouched() {
        for a in [0.0, 1.0, -1.0, PI, -PI + 1e-9, 3.0, -3.0] {
            assert_eq!(normalize_angle(a), a);
        }
    }

    #[test]
    fn test_single_turn_excursions_wrap() {
        assert!((normalize_angle(PI + 0.5) - (-PI + 0.5)).abs() < EPS);
        assert!((normalize_angle(-PI - 0.5) - (PI - 0.5)).abs() < EPS);
        assert!((normalize_angle(2.0 * PI) - 0.0).abs() < EPS);
        // lower bound is open
        assert_eq!(normalize_angle(-PI), PI);
    }

    #[test]
    fn test_normalization_is_idempotent_within_one_turn() {
        let mut a = -3.0 * PI + 0.01;
        while a < 3.0 * PI {
            let once = normalize_angle(a);
            assert!(once > -PI && once <= PI, "{a} -> {once}");
            assert_eq!(normalize_angle(once), once);
            a += 0.173;
        }
    }

    #[test]
    fn test_more_than_one_turn_stays_out_of_range() {
        let a = 5.0 * PI;
        assert!(normalize_angle(a) > PI);
    }
}
