//! Carousel tuning constants.
//!
//! All values are plain constants from the controller's point of view. They
//! can be built in code or read from TOML, where every key is optional:
//!
//! ```toml
//! autoplay_interval_ms = 5000
//! pause_cooldown_ms = 3000
//! swipe_confidence_threshold = 10000.0
//! touch_swipe_confidence_threshold = 5000.0
//! visibility_threshold = 0.1
//! transition_duration_ms = 500
//! ```

use std::path::Path;
use std::time::Duration;

use folio_core::logging::targets;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::navigation::DragInput;

/// Default time between automatic advances.
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000);

/// Default quiet window after manual navigation.
pub const DEFAULT_PAUSE_COOLDOWN: Duration = Duration::from_millis(3000);

/// Default swipe confidence threshold for mouse/pointer drags.
pub const DEFAULT_SWIPE_CONFIDENCE_THRESHOLD: f64 = 10_000.0;

/// Default swipe confidence threshold for touch drags.
///
/// Touch velocities are typically smaller than pointer velocities.
pub const DEFAULT_TOUCH_SWIPE_CONFIDENCE_THRESHOLD: f64 = 5_000.0;

/// Default fraction of the carousel that must be on screen for autoplay.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

/// Default slide transition duration.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// Tuning for a carousel instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    /// Time between automatic advances while not paused.
    pub autoplay_interval: Duration,
    /// How long autoplay stays paused after a click or indicator jump.
    pub pause_cooldown: Duration,
    /// Swipe power needed to change slides with a pointer drag.
    pub swipe_confidence_threshold: f64,
    /// Swipe power needed to change slides with a touch drag.
    pub touch_swipe_confidence_threshold: f64,
    /// Intersection ratio at or above which the carousel counts as visible.
    pub visibility_threshold: f32,
    /// Duration of the slide-in/slide-out animation.
    pub transition_duration: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: DEFAULT_AUTOPLAY_INTERVAL,
            pause_cooldown: DEFAULT_PAUSE_COOLDOWN,
            swipe_confidence_threshold: DEFAULT_SWIPE_CONFIDENCE_THRESHOLD,
            touch_swipe_confidence_threshold: DEFAULT_TOUCH_SWIPE_CONFIDENCE_THRESHOLD,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

/// On-disk shape; every field falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    autoplay_interval_ms: Option<u64>,
    pause_cooldown_ms: Option<u64>,
    swipe_confidence_threshold: Option<f64>,
    touch_swipe_confidence_threshold: Option<f64>,
    visibility_threshold: Option<f32>,
    transition_duration_ms: Option<u64>,
}

impl CarouselConfig {
    /// Parse and validate a configuration from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| Error::parse("carousel config", e))?;
        let defaults = Self::default();

        let config = Self {
            autoplay_interval: file
                .autoplay_interval_ms
                .map_or(defaults.autoplay_interval, Duration::from_millis),
            pause_cooldown: file
                .pause_cooldown_ms
                .map_or(defaults.pause_cooldown, Duration::from_millis),
            swipe_confidence_threshold: file
                .swipe_confidence_threshold
                .unwrap_or(defaults.swipe_confidence_threshold),
            touch_swipe_confidence_threshold: file
                .touch_swipe_confidence_threshold
                .unwrap_or(defaults.touch_swipe_confidence_threshold),
            visibility_threshold: file
                .visibility_threshold
                .unwrap_or(defaults.visibility_threshold),
            transition_duration: file
                .transition_duration_ms
                .map_or(defaults.transition_duration, Duration::from_millis),
        };
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "loaded carousel config");
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.autoplay_interval.is_zero() {
            return Err(Error::invalid_value("autoplay_interval", "must be greater than zero"));
        }
        if self.pause_cooldown.is_zero() {
            return Err(Error::invalid_value("pause_cooldown", "must be greater than zero"));
        }
        if !(self.swipe_confidence_threshold.is_finite() && self.swipe_confidence_threshold > 0.0) {
            return Err(Error::invalid_value(
                "swipe_confidence_threshold",
                format!("must be positive, got {}", self.swipe_confidence_threshold),
            ));
        }
        if !(self.touch_swipe_confidence_threshold.is_finite()
            && self.touch_swipe_confidence_threshold > 0.0)
        {
            return Err(Error::invalid_value(
                "touch_swipe_confidence_threshold",
                format!("must be positive, got {}", self.touch_swipe_confidence_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(Error::invalid_value(
                "visibility_threshold",
                format!("must be within 0.0..=1.0, got {}", self.visibility_threshold),
            ));
        }
        Ok(())
    }

    /// The swipe confidence threshold for an input kind.
    pub fn swipe_threshold(&self, input: DragInput) -> f64 {
        match input {
            DragInput::Pointer => self.swipe_confidence_threshold,
            DragInput::Touch => self.touch_swipe_confidence_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(CarouselConfig::from_toml_str("").unwrap(), CarouselConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = CarouselConfig::from_toml_str(
            "autoplay_interval_ms = 8000\ntouch_swipe_confidence_threshold = 2500.0\n",
        )
        .unwrap();
        assert_eq!(config.autoplay_interval, Duration::from_secs(8));
        assert_eq!(config.pause_cooldown, DEFAULT_PAUSE_COOLDOWN);
        assert_eq!(config.swipe_threshold(DragInput::Touch), 2500.0);
        assert_eq!(config.swipe_threshold(DragInput::Pointer), 10_000.0);
    }

    #[test]
    fn test_zero_autoplay_interval_rejected() {
        let err = CarouselConfig::from_toml_str("autoplay_interval_ms = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field: "autoplay_interval", .. }));
    }

    #[test]
    fn test_zero_pause_cooldown_rejected() {
        let err = CarouselConfig::from_toml_str("pause_cooldown_ms = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field: "pause_cooldown", .. }));
    }

    #[test]
    fn test_zero_transition_duration_means_instant_switch() {
        let config = CarouselConfig::from_toml_str("transition_duration_ms = 0").unwrap();
        assert_eq!(config.transition_duration, Duration::ZERO);
    }

    #[test]
    fn test_visibility_out_of_range_rejected() {
        let err = CarouselConfig::from_toml_str("visibility_threshold = 1.5").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { field: "visibility_threshold", .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CarouselConfig::from_toml_str("autoplay = true").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = CarouselConfig {
            swipe_confidence_threshold: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
