//! Carousel controller implementation.
//!
//! This module provides [`CarouselController`], which owns which slide is
//! shown, advances it automatically, and responds to manual navigation (arrow
//! clicks, indicator clicks, drags, keys) while suspending autoplay during and
//! briefly after the interaction.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use folio_carousel::{CarouselConfig, CarouselController, Slide, SlideDeck};
//! use folio_core::ManualClock;
//!
//! let deck: SlideDeck = ["A", "B", "C"]
//!     .into_iter()
//!     .map(|t| Slide::new(t, "", "", ""))
//!     .collect();
//! let clock = ManualClock::new();
//! let mut carousel =
//!     CarouselController::with_clock(deck, CarouselConfig::default(), Arc::new(clock.clone()));
//!
//! carousel.current_changed.connect(|change| {
//!     println!("Showing slide {}", change.display_index);
//! });
//!
//! carousel.mount();
//! clock.advance(Duration::from_secs(5));
//! carousel.tick();
//! assert_eq!(carousel.display_index(), Some(1));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::logging::{targets, PerfSpan};
use folio_core::{Clock, Signal, SystemClock, TimerId, TimerManager};

use crate::config::CarouselConfig;
use crate::navigation::{interpret_swipe, wrap, Direction, DragInput};
use crate::slide::{Slide, SlideDeck};
use crate::visibility::ViewportVisibility;

/// Mutable navigation state owned by a [`CarouselController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    /// Logical slide position; unbounded and never wrapped.
    pub current_index: i64,
    /// Sign of the most recent navigation.
    pub direction: Direction,
    /// Whether a drag gesture is in progress.
    pub is_dragging: bool,
    /// Whether autoplay is suspended.
    pub is_paused: bool,
}

/// Payload of [`CarouselController::current_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    /// The new logical index.
    pub current_index: i64,
    /// The new wrapped index into the deck.
    pub display_index: usize,
    /// Which way the carousel moved.
    pub direction: Direction,
}

/// What the renderer needs to draw the current slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSlide<'a> {
    /// Wrapped index into the deck.
    pub display_index: usize,
    /// Which side the slide should animate in from.
    pub direction: Direction,
    /// The slide data.
    pub slide: &'a Slide,
}

/// One page indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// Display index this dot jumps to.
    pub index: usize,
    /// Whether this dot is the displayed slide.
    pub active: bool,
}

/// Keys the carousel responds to while focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    /// Previous slide.
    Left,
    /// Next slide.
    Right,
    /// First slide.
    Home,
    /// Last slide.
    End,
}

/// Carousel state machine with autoplay and pause-on-interaction.
///
/// The controller is driven by its host: input handlers call the `on_*`
/// methods, and the host's event loop calls [`tick`](Self::tick) whenever
/// time may have passed. Timers are private to each instance.
///
/// # Signals
///
/// - `current_changed(SlideChange)`: Emitted on every pagination of a non-empty deck
/// - `paused_changed(bool)`: Emitted when autoplay is suspended or resumed
pub struct CarouselController {
    deck: SlideDeck,
    config: CarouselConfig,
    state: CarouselState,

    /// Input kind of the current (or last) drag.
    drag_input: DragInput,
    visibility: ViewportVisibility,

    timers: TimerManager,
    autoplay_timer: Option<TimerId>,
    resume_timer: Option<TimerId>,
    mounted: bool,

    /// Signal emitted when the current slide changes.
    pub current_changed: Signal<SlideChange>,

    /// Signal emitted when autoplay pauses or resumes.
    pub paused_changed: Signal<bool>,
}

impl CarouselController {
    /// Create a controller on the real clock.
    pub fn new(deck: SlideDeck, config: CarouselConfig) -> Self {
        Self::with_clock(deck, config, Arc::new(SystemClock))
    }

    /// Create a controller reading time from `clock`.
    pub fn with_clock(deck: SlideDeck, config: CarouselConfig, clock: Arc<dyn Clock>) -> Self {
        let visibility = ViewportVisibility::new(config.visibility_threshold);
        Self {
            deck,
            config,
            state: CarouselState::default(),
            drag_input: DragInput::default(),
            visibility,
            timers: TimerManager::new(clock),
            autoplay_timer: None,
            resume_timer: None,
            mounted: false,
            current_changed: Signal::new(),
            paused_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the carousel to a view and start autoplay.
    ///
    /// Does nothing if already mounted. An empty deck never starts a timer.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!(target: targets::CAROUSEL, slides = self.deck.len(), "carousel mounted");
        let now = self.timers.now();
        self.sync_autoplay(now);
    }

    /// Detach the carousel and clear every timer it owns.
    ///
    /// The slide position survives; drag, pause and visibility state are
    /// discarded so a later mount starts autoplay afresh. After this,
    /// [`tick`](Self::tick) mutates nothing until the next mount.
    pub fn unmount(&mut self) {
        if !self.mounted && self.autoplay_timer.is_none() && self.resume_timer.is_none() {
            return;
        }
        self.mounted = false;
        self.stop_autoplay();
        self.cancel_resume();
        self.state.is_dragging = false;
        self.state.is_paused = false;
        self.visibility = ViewportVisibility::new(self.config.visibility_threshold);
        tracing::debug!(target: targets::CAROUSEL, "carousel unmounted");
    }

    /// Whether the carousel is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Fire every timer that is due, in fire-time order.
    ///
    /// Returns the number of timers handled.
    pub fn tick(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let _span = PerfSpan::new("carousel_tick");

        let mut handled = 0;
        while let Some(expired) = self.timers.pop_expired() {
            handled += 1;
            if Some(expired.id) == self.autoplay_timer {
                tracing::trace!(target: targets::CAROUSEL, "autoplay advance");
                self.paginate(1);
            } else if Some(expired.id) == self.resume_timer {
                self.resume_timer = None;
                // Off-screen or mid-drag, drag end or the next visibility change resumes.
                if self.visibility.is_visible() && !self.state.is_dragging {
                    self.set_paused_at(false, expired.fire_time);
                }
            }
        }
        handled
    }

    /// Time until the next timer is due, if any.
    pub fn time_until_next_tick(&mut self) -> Option<Duration> {
        self.timers.time_until_next()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move by `step` slides without bounds checking.
    ///
    /// Wrapping happens only when the display index is derived, so the
    /// direction stays meaningful across the end of the deck.
    pub fn paginate(&mut self, step: i64) {
        self.state.direction = Direction::of_step(step);
        self.state.current_index = self.state.current_index.saturating_add(step);

        let Some(display_index) = self.display_index() else {
            return;
        };
        tracing::debug!(
            target: targets::CAROUSEL,
            current_index = self.state.current_index,
            display_index,
            direction = ?self.state.direction,
            "paginated"
        );
        self.current_changed.emit(SlideChange {
            current_index: self.state.current_index,
            display_index,
            direction: self.state.direction,
        });
    }

    /// Jump to a display index, then pause autoplay for the cooldown.
    ///
    /// Out-of-range targets are clamped into the deck. Does nothing on an
    /// empty deck.
    pub fn go_to(&mut self, target_display_index: i64) {
        let Some(current) = self.display_index() else {
            return;
        };
        let last = self.deck.len() as i64 - 1;
        let target = target_display_index.clamp(0, last);
        self.paginate(target - current as i64);
        self.pause_for(self.config.pause_cooldown);
    }

    /// Next-arrow click.
    pub fn next(&mut self) {
        self.paginate(1);
        self.pause_for(self.config.pause_cooldown);
    }

    /// Previous-arrow click.
    pub fn previous(&mut self) {
        self.paginate(-1);
        self.pause_for(self.config.pause_cooldown);
    }

    /// Keyboard navigation while the carousel has focus.
    pub fn on_key(&mut self, key: NavKey) {
        match key {
            NavKey::Left => self.previous(),
            NavKey::Right => self.next(),
            NavKey::Home => self.go_to(0),
            NavKey::End => self.go_to(self.deck.len() as i64 - 1),
        }
    }

    // =========================================================================
    // Drag Gestures
    // =========================================================================

    /// A pointer drag started.
    pub fn on_drag_start(&mut self) {
        self.on_drag_start_with(DragInput::Pointer);
    }

    /// A drag started from the given input kind.
    ///
    /// Autoplay is suspended for the whole drag so it never races the user.
    pub fn on_drag_start_with(&mut self, input: DragInput) {
        self.drag_input = input;
        self.state.is_dragging = true;
        self.cancel_resume();
        self.set_paused(true);
    }

    /// A drag ended with the given horizontal offset and release velocity.
    ///
    /// Returns the navigation the gesture produced, if any.
    pub fn on_drag_end(&mut self, offset_x: f64, velocity_x: f64) -> Direction {
        let threshold = self.config.swipe_threshold(self.drag_input);
        let direction = interpret_swipe(offset_x, velocity_x, threshold);
        tracing::trace!(
            target: targets::CAROUSEL,
            offset_x,
            velocity_x,
            threshold,
            ?direction,
            "drag ended"
        );
        if direction != Direction::None {
            self.paginate(direction.sign());
        }
        self.state.is_dragging = false;
        self.set_paused(false);
        direction
    }

    // =========================================================================
    // Pausing
    // =========================================================================

    /// Pause autoplay, resuming after `duration`.
    ///
    /// Each call cancels the previously scheduled resume, so the quiet
    /// window always counts from the latest interaction.
    pub fn pause_for(&mut self, duration: Duration) {
        self.cancel_resume();
        self.set_paused(true);
        self.resume_timer = Some(self.timers.start_one_shot(duration));
    }

    /// Pointer entered the carousel.
    pub fn on_hover_enter(&mut self) {
        self.set_paused(true);
    }

    /// Pointer left the carousel.
    pub fn on_hover_leave(&mut self) {
        self.set_paused(false);
    }

    /// Keyboard focus entered the carousel.
    pub fn on_focus_in(&mut self) {
        self.set_paused(true);
    }

    /// Keyboard focus left the carousel.
    pub fn on_focus_out(&mut self) {
        self.set_paused(false);
    }

    /// The fraction of the carousel inside the viewport changed.
    ///
    /// Going off-screen pauses autoplay; coming back resumes it.
    pub fn on_visibility_changed(&mut self, intersection_ratio: f32) {
        if let Some(visible) = self.visibility.update(intersection_ratio) {
            tracing::debug!(target: targets::CAROUSEL, visible, "visibility changed");
            self.set_paused(!visible);
        }
    }

    /// Set the paused flag directly.
    pub fn set_paused(&mut self, paused: bool) {
        let now = self.timers.now();
        self.set_paused_at(paused, now);
    }

    /// Set the paused flag, restarting autoplay relative to `origin` on resume.
    fn set_paused_at(&mut self, paused: bool, origin: Instant) {
        if self.state.is_paused == paused {
            return;
        }
        self.state.is_paused = paused;
        tracing::trace!(target: targets::CAROUSEL, paused, "pause state changed");
        self.sync_autoplay(origin);
        self.paused_changed.emit(paused);
    }

    /// Start or stop the autoplay timer to match the current state.
    fn sync_autoplay(&mut self, origin: Instant) {
        let should_run = self.mounted && !self.state.is_paused && !self.deck.is_empty();
        if !should_run {
            self.stop_autoplay();
        } else if self.autoplay_timer.is_none() {
            let id = self
                .timers
                .start_repeating_from(origin, self.config.autoplay_interval);
            self.autoplay_timer = Some(id);
        }
    }

    fn cancel_resume(&mut self) {
        if let Some(id) = self.resume_timer.take() {
            let _ = self.timers.stop(id);
        }
    }

    fn stop_autoplay(&mut self) {
        if let Some(id) = self.autoplay_timer.take() {
            let _ = self.timers.stop(id);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// A snapshot of the navigation state.
    pub fn state(&self) -> CarouselState {
        self.state
    }

    /// Logical slide position.
    pub fn current_index(&self) -> i64 {
        self.state.current_index
    }

    /// Wrapped index into the deck, or `None` for an empty deck.
    pub fn display_index(&self) -> Option<usize> {
        wrap(self.state.current_index, 0, self.deck.len() as i64).map(|i| i as usize)
    }

    /// Sign of the most recent navigation.
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Whether autoplay is suspended.
    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Whether the autoplay timer is currently running.
    pub fn is_autoplay_active(&self) -> bool {
        self.autoplay_timer.is_some_and(|id| self.timers.is_active(id))
    }

    /// Whether a timed resume is scheduled.
    pub fn has_pending_resume(&self) -> bool {
        self.resume_timer.is_some_and(|id| self.timers.is_active(id))
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.deck.len()
    }

    /// The slides this carousel shows.
    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    /// The tuning this carousel uses.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The slide to render, or `None` for an empty deck.
    pub fn active_slide(&self) -> Option<ActiveSlide<'_>> {
        let display_index = self.display_index()?;
        Some(ActiveSlide {
            display_index,
            direction: self.state.direction,
            slide: self.deck.get(display_index)?,
        })
    }

    /// One indicator per slide, with the displayed one marked active.
    pub fn indicators(&self) -> Vec<Indicator> {
        let active = self.display_index();
        (0..self.deck.len())
            .map(|index| Indicator {
                index,
                active: Some(index) == active,
            })
            .collect()
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("slides", &self.deck.len())
            .field("state", &self.state)
            .field("mounted", &self.mounted)
            .field("autoplay_active", &self.is_autoplay_active())
            .field("pending_resume", &self.has_pending_resume())
            .finish()
    }
}

static_assertions::assert_impl_all!(CarouselController: Send, Sync);
