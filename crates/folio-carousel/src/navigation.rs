//! Index wrapping and swipe interpretation.

/// Map `value` into `[min, max)` with non-negative modulo.
///
/// Returns `None` for an empty range (`max <= min`), which is how an empty
/// deck is guarded against dividing by zero.
///
/// ```
/// use folio_carousel::wrap;
///
/// assert_eq!(wrap(3, 0, 3), Some(0));
/// assert_eq!(wrap(-1, 0, 3), Some(2));
/// assert_eq!(wrap(7, 0, 0), None);
/// ```
#[inline]
pub fn wrap(value: i64, min: i64, max: i64) -> Option<i64> {
    if max <= min {
        return None;
    }
    Some(min + (value - min).rem_euclid(max - min))
}

/// Sign of the most recent navigation.
///
/// Used only to choose which side the entering slide comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Moved to an earlier slide.
    Backward,
    /// No movement yet, or a zero-step jump.
    #[default]
    None,
    /// Moved to a later slide.
    Forward,
}

impl Direction {
    /// The direction of a step.
    pub fn of_step(step: i64) -> Self {
        match step.signum() {
            1 => Self::Forward,
            -1 => Self::Backward,
            _ => Self::None,
        }
    }

    /// `-1`, `0` or `+1`.
    pub fn sign(self) -> i64 {
        match self {
            Self::Backward => -1,
            Self::None => 0,
            Self::Forward => 1,
        }
    }
}

/// What kind of device produced a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragInput {
    /// Mouse or pen drag.
    #[default]
    Pointer,
    /// Finger drag.
    Touch,
}

/// Heuristic intent score of a drag: `|offset_x| * velocity_x`.
///
/// The velocity's sign is taken from the drag offset, so a leftward drag
/// scores negative even if the reported release velocity has already
/// flipped or been reported unsigned.
#[inline]
pub fn swipe_power(offset_x: f64, velocity_x: f64) -> f64 {
    offset_x * velocity_x.abs()
}

/// Decide which way a finished drag should navigate.
///
/// A strongly negative power (dragging left) moves forward, a strongly
/// positive one moves backward; anything within the threshold stays put.
pub fn interpret_swipe(offset_x: f64, velocity_x: f64, threshold: f64) -> Direction {
    let power = swipe_power(offset_x, velocity_x);
    if power < -threshold {
        Direction::Forward
    } else if power > threshold {
        Direction::Backward
    } else {
        Direction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_stays_in_range_and_is_periodic() {
        for n in 1..=7 {
            for i in -50..=50 {
                let w = wrap(i, 0, n).unwrap();
                assert!((0..n).contains(&w), "wrap({i}, 0, {n}) = {w}");
                assert_eq!(w, wrap(i + n, 0, n).unwrap());
            }
        }
    }

    #[test]
    fn test_wrap_with_offset_range() {
        assert_eq!(wrap(10, 5, 8), Some(7));
        assert_eq!(wrap(4, 5, 8), Some(7));
        assert_eq!(wrap(5, 5, 5), None);
    }

    #[test]
    fn test_wrap_extremes_do_not_overflow() {
        assert_eq!(wrap(i64::MIN + 1, 0, 5), Some((i64::MIN + 1).rem_euclid(5)));
        assert_eq!(wrap(i64::MAX, 0, 1), Some(0));
    }

    #[test]
    fn test_direction_of_step() {
        assert_eq!(Direction::of_step(4), Direction::Forward);
        assert_eq!(Direction::of_step(-2), Direction::Backward);
        assert_eq!(Direction::of_step(0), Direction::None);
        assert_eq!(Direction::Backward.sign(), -1);
    }

    #[test]
    fn test_swipe_thresholds() {
        assert_eq!(interpret_swipe(-150.0, 100.0, 10_000.0), Direction::Forward);
        assert_eq!(interpret_swipe(-150.0, -100.0, 10_000.0), Direction::Forward);
        assert_eq!(interpret_swipe(150.0, 100.0, 10_000.0), Direction::Backward);
        assert_eq!(interpret_swipe(-10.0, 5.0, 10_000.0), Direction::None);
        // Exactly at the threshold is not enough.
        assert_eq!(interpret_swipe(-100.0, 100.0, 10_000.0), Direction::None);
    }

    #[test]
    fn test_touch_threshold_accepts_softer_swipes() {
        assert_eq!(interpret_swipe(-80.0, 90.0, 10_000.0), Direction::None);
        assert_eq!(interpret_swipe(-80.0, 90.0, 5_000.0), Direction::Forward);
    }
}
