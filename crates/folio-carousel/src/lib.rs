//! Project carousel for the Folio portfolio.
//!
//! The carousel shows one project slide at a time, advances on its own, and
//! gets out of the way while the visitor is interacting with it:
//!
//! - **Controller**: [`CarouselController`] owns the index, autoplay timer and
//!   pause/resume lifecycle
//! - **Navigation**: [`wrap`] and swipe interpretation for drags
//! - **Slides**: [`Slide`] and [`SlideDeck`], loadable from TOML
//! - **Transitions**: direction-aware slide-in offsets for the renderer
//! - **Visibility**: pauses autoplay while the carousel is off-screen
//!
//! Rendering is left to the host. It feeds input events and a clock in, and
//! reads [`CarouselController::active_slide`] and the signals out.
//!
//! # Example
//!
//! ```
//! use folio_carousel::{CarouselConfig, CarouselController, Direction, SlideDeck};
//!
//! let deck = SlideDeck::from_toml_str(r#"
//! [[slides]]
//! title = "Tile server"
//! description = "Streams slide tiles"
//! image_ref = "tiles.png"
//! external_link_ref = "https://example.com/tiles"
//!
//! [[slides]]
//! title = "Whiteboard"
//! description = "Realtime collaborative board"
//! image_ref = "board.png"
//! external_link_ref = "https://example.com/board"
//! "#)?;
//!
//! let mut carousel = CarouselController::new(deck, CarouselConfig::default());
//! carousel.mount();
//!
//! carousel.on_drag_start();
//! assert_eq!(carousel.on_drag_end(-200.0, 60.0), Direction::Forward);
//! assert_eq!(carousel.active_slide().map(|s| s.slide.title.as_str()), Some("Whiteboard"));
//! # Ok::<(), folio_carousel::Error>(())
//! ```

pub mod config;
mod controller;
mod easing;
mod error;
mod navigation;
mod slide;
pub mod transition;
mod visibility;

pub use config::CarouselConfig;
pub use controller::{ActiveSlide, CarouselController, CarouselState, Indicator, NavKey, SlideChange};
pub use easing::{ease, lerp_eased, Easing};
pub use error::{Error, Result};
pub use navigation::{interpret_swipe, swipe_power, wrap, Direction, DragInput};
pub use slide::{Slide, SlideDeck};
pub use transition::{SlideTransition, SlideVariants, TransitionFrame};
pub use visibility::ViewportVisibility;
