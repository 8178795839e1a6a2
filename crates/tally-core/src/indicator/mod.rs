//! The progress indicator.
//!
//! A `ProgressIndicator` is bumped from any number of threads. Every bump
//! runs under one lock together with the decision whether to redraw, so
//! counts and terminal output never interleave. Redraws are throttled three
//! ways: a count gate extrapolated from the last advance, a minimum wall
//! clock interval that grows after every redraw, and (for known targets) a
//! minimum advance of 0.1% of the target.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::config::{DisplayOptions, Settings, Timing};
use crate::error::{TallyError, TallyResult};
use crate::render::{self, Frame, PLACEHOLDER};
use crate::scale::Measurements;


/// Single-line progress indicator writing to `W` (stdout by default)
pub struct ProgressIndicator<W: Write = Stdout> {
    state: Mutex<State<W>>,
}

/// Point-in-time view of an indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub count: u64,
    /// Expected total, 0 when unknown
    pub target: u64,
    /// Lines drawn so far, the final one included
    pub redraws: u64,
    pub max_line_length: usize,
    pub finished: bool,
}

struct State<W> {
    writer: W,
    clock: Arc<dyn Clock>,
    display: DisplayOptions,
    timing: Timing,

    target: u64,
    count: u64,

    start: Instant,
    last_print: Instant,
    last_printed_count: u64,
    next_gate: u64,
    interval: Duration,

    max_line_length: usize,
    redraws: u64,
    finished: bool,
}

impl ProgressIndicator<Stdout> {
    /// Indicator on stdout; `target` of 0 means the total is unknown
    pub fn new(target: u64) -> Self {
        Self::with_parts(target, Settings::default(), io::stdout(), Arc::new(MonotonicClock))
    }

    /// Indicator on stdout with explicit settings
    pub fn with_settings(target: u64, settings: Settings) -> Self {
        Self::with_parts(target, settings, io::stdout(), Arc::new(MonotonicClock))
    }
}

impl<W: Write> ProgressIndicator<W> {
    /// Indicator on an arbitrary sink with default settings
    pub fn with_writer(target: u64, writer: W) -> Self {
        Self::with_parts(target, Settings::default(), writer, Arc::new(MonotonicClock))
    }

    /// Indicator with every collaborator supplied by the caller.
    ///
    /// Writes the placeholder line immediately so the terminal shows
    /// activity before the first measurement.
    pub fn with_parts(target: u64, settings: Settings, writer: W, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let mut state = State {
            writer,
            clock,
            interval: settings.timing.base_interval,
            display: settings.display,
            timing: settings.timing,
            target,
            count: 0,
            start: now,
            last_print: now,
            last_printed_count: 0,
            next_gate: 0,
            max_line_length: 0,
            redraws: 0,
            finished: false,
        };

        if let Err(e) = state.write_placeholder() {
            warn!("Progress placeholder was not written: {}", e);
        }

        Self {
            state: Mutex::new(state),
        }
    }

    /// Label printed before every other segment
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        self.state.lock().display.prefix = if prefix.is_empty() { None } else { Some(prefix) };
    }

    pub fn set_show_percent(&self, show: bool) {
        self.state.lock().display.show_percent = show;
    }

    pub fn set_show_bar(&self, show: bool) {
        self.state.lock().display.show_bar = show;
    }

    pub fn set_show_elapsed(&self, show: bool) {
        self.state.lock().display.show_elapsed = show;
    }

    pub fn set_show_rate(&self, show: bool) {
        self.state.lock().display.show_rate = show;
    }

    pub fn set_show_eta(&self, show: bool) {
        self.state.lock().display.show_eta = show;
    }

    /// Count one unit of work
    pub fn increment(&self) {
        self.state.lock().bump(1);
    }

    /// Count `n` units of work
    pub fn increment_by(&self, n: u64) {
        self.state.lock().bump(n);
    }

    /// Same as `increment_by`
    pub fn add(&self, n: u64) {
        self.increment_by(n);
    }

    /// Draw the final line and freeze the indicator.
    ///
    /// With `enforce`, a known target that was not hit exactly is reported
    /// as complete: the count snaps to the target and the elapsed and rate
    /// segments are dropped because they would describe the real count.
    /// Calling it again has no effect.
    pub fn finish(&self, enforce: bool) {
        self.state.lock().finish(enforce);
    }

    /// Blank out the current line instead of finishing it
    pub fn remove(&self) {
        self.state.lock().remove();
    }

    pub fn count(&self) -> u64 {
        self.state.lock().count
    }

    pub fn target(&self) -> u64 {
        self.state.lock().target
    }

    pub fn is_finished(&self) -> bool {
        self.state.lock().finished
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }
}

impl<W: Write> Drop for ProgressIndicator<W> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if !state.finished {
            state.finish(true);
        }
    }
}

impl<W: Write> State<W> {
    fn bump(&mut self, n: u64) {
        if self.finished {
            trace!("Ignoring increment of {} on a finished indicator", n);
            return;
        }

        self.count = self.count.saturating_add(n);

        let now = self.clock.now();
        if self.should_draw(now) {
            if let Err(e) = self.draw(now, false) {
                warn!("Progress redraw failed: {}", e);
            }

            let advance = self.count.saturating_sub(self.last_printed_count);
            self.last_print = now;
            self.next_gate = self.count.saturating_add(advance).saturating_sub(1);
            self.last_printed_count = self.count;
            self.interval += self.timing.interval_increase;
            debug!(
                "Progress redrawn at {} (next gate {}, interval {:?})",
                self.count, self.next_gate, self.interval
            );
        }
    }

    fn should_draw(&self, now: Instant) -> bool {
        if self.count <= self.next_gate {
            return false;
        }

        if now.saturating_duration_since(self.last_print) <= self.interval {
            return false;
        }

        if self.target > 0 {
            let advance = (self.count - self.last_printed_count) as f64 / self.target as f64;
            return advance >= self.timing.min_advance_ratio;
        }

        true
    }

    fn finish(&mut self, enforce: bool) {
        if self.finished {
            return;
        }

        if enforce && self.target > 0 && self.count != self.target {
            self.display.show_elapsed = false;
            self.display.show_rate = false;
            self.count = self.target;
        }

        let now = self.clock.now();
        if let Err(e) = self.draw(now, true) {
            warn!("Final progress line failed: {}", e);
        }

        self.finished = true;
        self.next_gate = u64::MAX;
        debug!("Progress finished at {} of {}", self.count, self.target);
    }

    fn remove(&mut self) {
        if self.finished {
            return;
        }

        let blank = render::pad_to(String::new(), self.max_line_length);
        if let Err(e) = self.emit(&blank, '\r') {
            warn!("Progress line could not be removed: {}", e);
        }

        self.finished = true;
        self.next_gate = u64::MAX;
        debug!("Progress line removed at {}", self.count);
    }

    fn draw(&mut self, now: Instant, is_final: bool) -> TallyResult<()> {
        let elapsed = now.saturating_duration_since(self.start);
        let measurements = Measurements::take(elapsed, self.count, self.target);

        let line = Frame {
            display: &self.display,
            count: self.count,
            target: self.target,
            measurements: &measurements,
            is_final,
        }
        .compose();

        let len = line.chars().count();
        let line = render::pad_to(line, self.max_line_length);
        self.max_line_length = self.max_line_length.max(len);
        self.redraws += 1;

        self.emit(&line, if is_final { '\n' } else { '\r' })
    }

    fn write_placeholder(&mut self) -> TallyResult<()> {
        self.emit(PLACEHOLDER, '\r')
    }

    fn emit(&mut self, line: &str, terminator: char) -> TallyResult<()> {
        write!(self.writer, "{}{}", line, terminator)
            .map_err(|e| TallyError::io("Failed to write progress line", e))?;
        self.writer
            .flush()
            .map_err(|e| TallyError::io("Failed to flush progress line", e))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            count: self.count,
            target: self.target,
            redraws: self.redraws,
            max_line_length: self.max_line_length,
            finished: self.finished,
        }
    }
}
