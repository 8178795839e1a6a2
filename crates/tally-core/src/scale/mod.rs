//! Time-scale measurements of elapsed time, throughput and remaining time.
//!
//! Every redraw measures the run in all five scales at once. The elapsed and
//! ETA texts use the largest scale whose elapsed value exceeds one unit; the
//! rate text uses the smallest scale whose rate exceeds one item per unit.

use std::time::Duration;

/// Unit used to express elapsed time, rate and ETA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeScale {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeScale {
    /// All scales, smallest unit first
    pub const ASCENDING: [TimeScale; 5] = [
        TimeScale::Milliseconds,
        TimeScale::Seconds,
        TimeScale::Minutes,
        TimeScale::Hours,
        TimeScale::Days,
    ];

    /// Length of one unit of this scale
    pub fn tick(self) -> Duration {
        match self {
            TimeScale::Milliseconds => Duration::from_millis(1),
            TimeScale::Seconds => Duration::from_secs(1),
            TimeScale::Minutes => Duration::from_secs(60),
            TimeScale::Hours => Duration::from_secs(60 * 60),
            TimeScale::Days => Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Label after an amount of time ("3.5 min")
    pub fn duration_label(self) -> &'static str {
        match self {
            TimeScale::Milliseconds => "ms",
            TimeScale::Seconds => "sec",
            TimeScale::Minutes => "min",
            TimeScale::Hours => "hours",
            TimeScale::Days => "days",
        }
    }

    /// Label after a rate ("12.0 / sec")
    pub fn rate_label(self) -> &'static str {
        match self {
            TimeScale::Milliseconds => "ms",
            TimeScale::Seconds => "sec",
            TimeScale::Minutes => "min",
            TimeScale::Hours => "hour",
            TimeScale::Days => "day",
        }
    }

    /// Express a duration in this scale's unit
    pub fn convert(self, elapsed: Duration) -> f64 {
        elapsed.as_nanos() as f64 / self.tick().as_nanos() as f64
    }
}

/// Elapsed time, rate and ETA of one run expressed in a single scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub scale: TimeScale,
    /// Time since start, in units
    pub elapsed: f64,
    /// Items per unit
    pub rate: f64,
    /// Units until the target is reached at the current rate
    pub eta: f64,
}

impl Measurement {
    /// Measure a run of `count` items out of `target` after `elapsed`
    pub fn take(scale: TimeScale, elapsed: Duration, count: u64, target: u64) -> Self {
        let elapsed = scale.convert(elapsed);
        let rate = count as f64 / elapsed;
        let eta = (target as f64 - count as f64) / rate;
        Self {
            scale,
            elapsed,
            rate,
            eta,
        }
    }

    /// Elapsed time, rate and ETA are all finite, non-zero, non-subnormal.
    ///
    /// A run sitting exactly on its target has an ETA of zero, so no scale
    /// is usable for it.
    pub fn is_valid(&self) -> bool {
        self.elapsed.is_normal() && self.rate.is_normal() && self.eta.is_normal()
    }
}

/// The same run measured in every scale
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    ascending: [Measurement; 5],
}

impl Measurements {
    /// Measure a run in all five scales
    pub fn take(elapsed: Duration, count: u64, target: u64) -> Self {
        Self {
            ascending: TimeScale::ASCENDING
                .map(|scale| Measurement::take(scale, elapsed, count, target)),
        }
    }

    /// Largest scale whose elapsed value exceeds one unit
    pub fn elapsed_scale(&self) -> Option<&Measurement> {
        self.ascending
            .iter()
            .rev()
            .find(|m| m.is_valid() && m.elapsed > 1.0)
    }

    /// Smallest scale whose rate exceeds one item per unit
    pub fn rate_scale(&self) -> Option<&Measurement> {
        self.ascending
            .iter()
            .find(|m| m.is_valid() && m.rate > 1.0)
    }

    /// The ETA is expressed in the scale chosen for the elapsed time
    pub fn eta_scale(&self) -> Option<&Measurement> {
        self.elapsed_scale()
    }
}
