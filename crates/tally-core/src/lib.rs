//! # tally-core
//!
//! A single-line terminal progress indicator.
//!
//! The indicator is bumped from application code and redraws one status line
//! in place (carriage-return overwrite) with the percent done, a bar, the
//! elapsed count, the throughput and the expected remaining time.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `indicator`: the `ProgressIndicator` itself (gating, finish, remove)
//! - `scale`: time-scale measurements of elapsed time, rate and ETA
//! - `render`: composition of the individual line segments
//! - `config`: display toggles, redraw timing and environment overrides
//! - `clock`: monotonic and manually driven time sources
//! - `output`: a shareable in-memory sink for capturing rendered lines
//! - `error`: error types and result aliases

pub mod clock;
pub mod config;
pub mod error;
pub mod indicator;
pub mod output;
pub mod render;
pub mod scale;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{DisplayOptions, Settings, Timing};
pub use error::{TallyError, TallyResult};
pub use indicator::{ProgressIndicator, Snapshot};
pub use output::SharedBuffer;
pub use scale::{Measurement, Measurements, TimeScale};
