//! Logging facilities for Folio.
//!
//! Folio uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("folio_carousel=debug,folio_core::timer=trace")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "folio_core";
    /// Timer system target.
    pub const TIMER: &str = "folio_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "folio_core::signal";
    /// Carousel controller target.
    pub const CAROUSEL: &str = "folio_carousel::controller";
    /// Deck and configuration loading target.
    pub const CONFIG: &str = "folio_carousel::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a block of work, e.g. a full `tick` of a widget.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "folio::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test");
            tracing::trace!(target: targets::CORE, "inside span");
        });
    }
}
