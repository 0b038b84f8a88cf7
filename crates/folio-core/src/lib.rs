//! Core systems for Folio.
//!
//! This crate provides the event-loop primitives the Folio widgets are built on:
//!
//! - **Clock**: A pluggable time source, real or manually driven
//! - **Timers**: One-shot and repeating timers ordered by fire time
//! - **Signal/Slot System**: Type-safe change notification
//! - **Logging**: Tracing targets for filtering per subsystem
//!
//! Everything here is single-threaded in spirit: the host's event loop owns the
//! timer manager and calls into it between input events. Nothing spawns threads
//! or sleeps.
//!
//! # Timer Example
//!
//! ```
//! use folio_core::{ManualClock, TimerManager};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut timers = TimerManager::new(Arc::new(clock.clone()));
//!
//! let id = timers.start_repeating(Duration::from_millis(100));
//! clock.advance(Duration::from_millis(250));
//!
//! let fired: Vec<_> = std::iter::from_fn(|| timers.pop_expired()).collect();
//! assert_eq!(fired.len(), 2);
//! assert!(fired.iter().all(|t| t.id == id));
//! ```
//!
//! # Signal Example
//!
//! ```
//! use folio_core::Signal;
//!
//! let index_changed = Signal::<usize>::new();
//! let conn_id = index_changed.connect(|index| {
//!     println!("Now showing slide {}", index);
//! });
//!
//! index_changed.emit(2);
//! index_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use signal::{ConnectionId, Signal};
pub use timer::{Clock, ExpiredTimer, ManualClock, SystemClock, TimerId, TimerKind, TimerManager};
