//! Slide-in/slide-out transitions.
//!
//! The side a slide enters from is chosen from the navigation [`Direction`],
//! never by comparing indices: moving forward from the last slide to the
//! first must still slide in from the right.

use std::time::{Duration, Instant};

use crate::config::DEFAULT_TRANSITION_DURATION;
use crate::easing::{lerp_eased, Easing};
use crate::navigation::Direction;

/// Start and end x offsets for the entering and exiting slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVariants {
    /// Where the entering slide starts; it ends at 0.
    pub enter_x: f32,
    /// Where the exiting slide ends; it starts at 0.
    pub exit_x: f32,
}

impl SlideVariants {
    /// Offsets for a move in `direction` across a viewport `width` wide.
    pub fn for_direction(direction: Direction, width: f32) -> Self {
        match direction {
            Direction::Forward => Self {
                enter_x: width,
                exit_x: -width,
            },
            Direction::Backward => Self {
                enter_x: -width,
                exit_x: width,
            },
            Direction::None => Self {
                enter_x: 0.0,
                exit_x: 0.0,
            },
        }
    }
}

/// Current state of a slide transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionFrame {
    /// No transition in progress.
    #[default]
    Idle,
    /// Transition is running.
    Running {
        /// Eased progress from 0.0 to 1.0.
        progress: f32,
        /// Display index of the slide leaving.
        from_index: usize,
        /// Display index of the slide arriving.
        to_index: usize,
        /// Current x offset of the arriving slide.
        entering_x: f32,
        /// Current x offset of the leaving slide.
        exiting_x: f32,
    },
}

impl TransitionFrame {
    /// Check if a transition is currently in progress.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Running {
    started: Instant,
    from_index: usize,
    to_index: usize,
    variants: SlideVariants,
}

/// Drives one horizontal slide transition at a time.
#[derive(Debug, Clone)]
pub struct SlideTransition {
    easing: Easing,
    duration: Duration,
    running: Option<Running>,
}

impl SlideTransition {
    /// Create a transition with the given duration and the default easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            easing: Easing::default(),
            duration,
            running: None,
        }
    }

    /// Use a different easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The transition duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Check if a transition is currently running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start a transition, replacing any running one.
    ///
    /// Returns `false` when nothing would visibly move (same slide or no
    /// direction).
    pub fn start(
        &mut self,
        from_index: usize,
        to_index: usize,
        direction: Direction,
        width: f32,
        now: Instant,
    ) -> bool {
        if from_index == to_index || direction == Direction::None {
            self.running = None;
            return false;
        }
        self.running = Some(Running {
            started: now,
            from_index,
            to_index,
            variants: SlideVariants::for_direction(direction, width),
        });
        true
    }

    /// Stop the current transition immediately.
    pub fn stop(&mut self) {
        self.running = None;
    }

    /// Advance the transition to `now` and report where the slides are.
    ///
    /// Returns `Idle` once the duration has elapsed.
    pub fn update(&mut self, now: Instant) -> TransitionFrame {
        let Some(running) = self.running else {
            return TransitionFrame::Idle;
        };

        let elapsed = now.saturating_duration_since(running.started);
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        if raw >= 1.0 {
            self.running = None;
            return TransitionFrame::Idle;
        }

        TransitionFrame::Running {
            progress: lerp_eased(self.easing, 0.0, 1.0, raw),
            from_index: running.from_index,
            to_index: running.to_index,
            entering_x: lerp_eased(self.easing, running.variants.enter_x, 0.0, raw),
            exiting_x: lerp_eased(self.easing, 0.0, running.variants.exit_x, raw),
        }
    }
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_DURATION)
    }
}
