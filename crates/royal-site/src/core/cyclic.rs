//! Index arithmetic on a circular sequence of `len` items.
//!
//! All functions treat `len == 0` as a degenerate carousel and return zero
//! rather than dividing by zero.

/// Wrap any integer into `[0, len)`.
#[must_use]
pub fn wrap(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let n = len as i64;
    (((index % n) + n) % n) as usize
}

/// Wrap a real position into `[0, len)`.
#[must_use]
pub fn wrap_f64(value: f64, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let n = len as f64;
    ((value % n) + n) % n
}

/// Shortest signed offset from `from` to `to` on a circle of `len`.
///
/// The raw difference is folded by one lap when it exceeds half the circle,
/// so for inputs already in `[0, len)` the result satisfies
/// `|delta| <= len / 2` and swapping the arguments negates it.
#[must_use]
pub fn shortest_delta(from: f64, to: f64, len: usize) -> f64 {
    let n = len as f64;
    let half = n / 2.0;
    let delta = to - from;
    if delta > half {
        delta - n
    } else if delta < -half {
        delta + n
    } else {
        delta
    }
}

/// Integer signed distance of `index` from `active`.
///
/// Both indices are wrapped first, so any integer is accepted. Negative
/// values sit to the left of the active item, positive ones to the right.
#[must_use]
pub fn signed_distance(index: i64, active: i64, len: usize) -> i64 {
    if len == 0 {
        return 0;
    }
    let n = len as i64;
    let delta = wrap(index, len) as i64 - wrap(active, len) as i64;
    if 2 * delta > n {
        delta - n
    } else if 2 * delta < -n {
        delta + n
    } else {
        delta
    }
}

/// Real signed distance of card `card` from a continuous rail position.
#[must_use]
pub fn wrapped_distance(card: usize, position: f64, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    shortest_delta(wrap_f64(position, len), card as f64, len)
}

/// Round to the nearest integer, halves towards positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Nearest item index to a continuous position.
#[must_use]
pub fn nearest_index(position: f64, len: usize) -> usize {
    wrap(round_half_up(position) as i64, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== wrap =====

    #[test]
    fn test_wrap_in_range() {
        assert_eq!(wrap(3, 5), 3);
    }

    #[test]
    fn test_wrap_negative() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-6, 5), 4);
    }

    #[test]
    fn test_wrap_overflowing() {
        assert_eq!(wrap(5, 5), 0);
        assert_eq!(wrap(12, 5), 2);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap(7, 0), 0);
        assert_eq!(wrap_f64(7.5, 0), 0.0);
    }

    #[test]
    fn test_wrap_f64() {
        assert_eq!(wrap_f64(6.5, 5), 1.5);
        assert_eq!(wrap_f64(-0.5, 5), 4.5);
        assert_eq!(wrap_f64(-1e-18, 5), 0.0);
    }

    // ===== signed_distance =====

    #[test]
    fn test_signed_distance_neighbours() {
        assert_eq!(signed_distance(1, 0, 5), 1);
        assert_eq!(signed_distance(4, 0, 5), -1);
        assert_eq!(signed_distance(0, 4, 5), 1);
    }

    #[test]
    fn test_signed_distance_folds_long_way() {
        assert_eq!(signed_distance(3, 0, 5), -2);
        assert_eq!(signed_distance(2, 0, 5), 2);
    }

    #[test]
    fn test_signed_distance_even_half_is_antisymmetric() {
        assert_eq!(signed_distance(2, 0, 4), 2);
        assert_eq!(signed_distance(0, 2, 4), -2);
    }

    #[test]
    fn test_signed_distance_unwrapped_inputs() {
        assert_eq!(signed_distance(-1, 11, 5), signed_distance(4, 1, 5));
    }

    // ===== shortest_delta / wrapped_distance =====

    #[test]
    fn test_shortest_delta() {
        assert_eq!(shortest_delta(2.0, 4.0, 5), 2.0);
        assert_eq!(shortest_delta(4.0, 0.0, 5), 1.0);
        assert_eq!(shortest_delta(0.0, 4.0, 5), -1.0);
    }

    #[test]
    fn test_wrapped_distance_fractional_position() {
        let d = wrapped_distance(0, 4.75, 5);
        assert!((d - 0.25).abs() < 1e-12);
        let d = wrapped_distance(1, -0.5, 5);
        assert!((d - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_index() {
        assert_eq!(nearest_index(0.49, 5), 0);
        assert_eq!(nearest_index(0.51, 5), 1);
        assert_eq!(nearest_index(-0.6, 5), 4);
        assert_eq!(nearest_index(10_002.2, 5), 2);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(nearest_index(-0.5, 5), 0);
    }
}
