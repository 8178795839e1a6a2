//! Common utilities for benchmarks

use std::io;
use std::sync::Arc;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use tally_core::{ManualClock, ProgressIndicator, Settings};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Indicator writing into `io::sink` on a clock the benchmark drives
pub fn sink_indicator(target: u64) -> (ProgressIndicator<io::Sink>, ManualClock) {
    let clock = ManualClock::new();
    let indicator =
        ProgressIndicator::with_parts(target, Settings::default(), io::sink(), Arc::new(clock.clone()));
    (indicator, clock)
}
