//! Display toggles, redraw timing and environment overrides.
//!
//! There is no configuration file. Settings start from defaults and can be
//! layered with `TALLY_*` environment variables and then with whatever the
//! host program applies on top (command-line flags in the `tally` binary).

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{TallyError, TallyResult};

/// Default minimum gap between two redraws
pub const BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Amount the redraw interval grows after every redraw
pub const INTERVAL_INCREASE: Duration = Duration::from_millis(100);

/// Fraction of the target a known-total run must advance between redraws
pub const MIN_ADVANCE_RATIO: f64 = 0.001;

/// Prefix of the environment variables picked up by `collect_env_overrides`
pub const ENV_PREFIX: &str = "TALLY_";

/// Which segments of the status line are rendered
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Label printed before every other segment
    pub prefix: Option<String>,
    pub show_percent: bool,
    pub show_bar: bool,
    pub show_elapsed: bool,
    pub show_rate: bool,
    pub show_eta: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            show_percent: true,
            show_bar: true,
            show_elapsed: true,
            show_rate: true,
            show_eta: true,
        }
    }
}

/// Redraw throttling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// Redraw interval at construction
    pub base_interval: Duration,
    /// Backoff added to the interval after each redraw
    pub interval_increase: Duration,
    /// Minimum `(count - last_printed) / target` before a redraw, known targets only
    pub min_advance_ratio: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            base_interval: BASE_INTERVAL,
            interval_increase: INTERVAL_INCREASE,
            min_advance_ratio: MIN_ADVANCE_RATIO,
        }
    }
}

/// Complete indicator configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub display: DisplayOptions,
    pub timing: Timing,
}

impl Settings {
    /// Defaults layered with the current `TALLY_*` environment
    pub fn from_env() -> TallyResult<Self> {
        let mut settings = Self::default();
        settings.apply_overrides(&Self::collect_env_overrides())?;
        Ok(settings)
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }

    /// Apply `TALLY_*` overrides; unknown keys are ignored
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> TallyResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "TALLY_PREFIX" => {
                    self.display.prefix = if value.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    };
                }
                "TALLY_SHOW_PERCENT" => self.display.show_percent = parse_flag(key, value)?,
                "TALLY_SHOW_BAR" => self.display.show_bar = parse_flag(key, value)?,
                "TALLY_SHOW_ELAPSED" => self.display.show_elapsed = parse_flag(key, value)?,
                "TALLY_SHOW_RATE" => self.display.show_rate = parse_flag(key, value)?,
                "TALLY_SHOW_ETA" => self.display.show_eta = parse_flag(key, value)?,
                "TALLY_INTERVAL_MS" => self.timing.base_interval = parse_millis(key, value)?,
                "TALLY_INTERVAL_INCREASE_MS" => {
                    self.timing.interval_increase = parse_millis(key, value)?
                }
                _ => {
                    // Unknown environment variable, ignore
                }
            }
        }

        Ok(())
    }
}

fn parse_flag(field: &str, value: &str) -> TallyResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TallyError::config(
            field,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

fn parse_millis(field: &str, value: &str) -> TallyResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| TallyError::config(field, format!("expected milliseconds: {}", e)))
}
