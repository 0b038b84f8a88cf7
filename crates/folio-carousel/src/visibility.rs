//! Viewport visibility tracking.
//!
//! The host reports how much of the carousel intersects the viewport (the
//! intersection ratio, 0.0 to 1.0). [`ViewportVisibility`] turns that stream
//! into visible/hidden transitions so autoplay can stop animating off-screen.

use crate::config::DEFAULT_VISIBILITY_THRESHOLD;

/// Hysteresis-free visibility flag derived from intersection ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportVisibility {
    threshold: f32,
    visible: bool,
}

impl ViewportVisibility {
    /// Create a tracker; the carousel starts out visible.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: true,
        }
    }

    /// The ratio at or above which the carousel is visible.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether the carousel currently counts as visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed a new intersection ratio.
    ///
    /// Returns `Some(visible)` when the flag flips, `None` otherwise. A NaN
    /// ratio is ignored.
    pub fn update(&mut self, ratio: f32) -> Option<bool> {
        if ratio.is_nan() {
            return None;
        }
        let visible = ratio.clamp(0.0, 1.0) >= self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}

impl Default for ViewportVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_only_transitions() {
        let mut vis = ViewportVisibility::new(0.25);
        assert_eq!(vis.update(0.9), None);
        assert_eq!(vis.update(0.1), Some(false));
        assert_eq!(vis.update(0.0), None);
        assert_eq!(vis.update(0.25), Some(true));
        assert!(vis.is_visible());
    }

    #[test]
    fn test_nan_ignored() {
        let mut vis = ViewportVisibility::default();
        assert_eq!(vis.update(f32::NAN), None);
        assert!(vis.is_visible());
    }
}
