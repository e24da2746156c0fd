//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (add / set / match_path) and config reloads produce:
//!     → tracing events (registration, conflicts, match outcomes, reloads)
//!     → metrics.rs (counters and gauges)
//!
//! The binary consumes:
//!     → logging.rs (subscriber setup, pretty or JSON output)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing subscribers and recorders is
//!   left to the host
//! - Match outcomes log at `trace` so hot lookups stay quiet by default

pub mod logging;
pub mod metrics;
