//! Composition of the status line.
//!
//! Each segment is rendered by its own function so the widths can be checked
//! in isolation. `Frame::compose` glues the enabled ones together; terminators
//! and padding are the indicator's job.

use crate::config::DisplayOptions;
use crate::scale::Measurements;

/// Number of cells between the bar's brackets
pub const PROGRESS_BARWIDTH: usize = 50;

/// Column width of the percent segment
pub const PERCENT_WIDTH: usize = 6;

pub const BAR_LEFT: char = '[';
pub const BAR_DONE: char = '=';
pub const BAR_HEAD: char = '>';
pub const BAR_REST: char = ' ';
pub const BAR_RIGHT: char = ']';

/// Placeholder written at construction, before any measurement exists
pub const PLACEHOLDER: &str = " ...";

/// Percent done, always six columns.
///
/// Precision drops as the number grows so the digits stay four wide; it is
/// picked after rounding, and an unfinished run never reads as 100%.
pub fn percent(count: u64, target: u64) -> String {
    if count > target {
        return ">100% ".to_string();
    }
    if count == target {
        return " 100% ".to_string();
    }

    let percent = count as f64 / target as f64 * 100.0;
    let digits = PERCENT_WIDTH - 2;
    let two = format!("{:.2}", percent);
    if two.len() == digits {
        return format!("{}% ", two);
    }
    let one = format!("{:.1}", percent);
    if one.len() == digits {
        return format!("{}% ", one);
    }
    "99.9% ".to_string()
}

/// Fixed-width bar; overshooting counts render as a full bar
pub fn bar(count: u64, target: u64) -> String {
    let ratio = if count < target {
        count as f64 / target as f64
    } else {
        1.0
    };
    let done = ((PROGRESS_BARWIDTH as f64 * ratio) + 0.5) as usize;
    let done = done.min(PROGRESS_BARWIDTH);
    let rest = PROGRESS_BARWIDTH - done;

    let mut out = String::with_capacity(PROGRESS_BARWIDTH + 2);
    out.push(BAR_LEFT);
    out.extend(std::iter::repeat(BAR_DONE).take(done));
    if rest > 0 {
        out.push(BAR_HEAD);
        out.extend(std::iter::repeat(BAR_REST).take(rest - 1));
    }
    out.push(BAR_RIGHT);
    out
}

/// `" <count> in <elapsed> <unit>"`
pub fn elapsed(count: u64, measurements: &Measurements) -> Option<String> {
    let m = measurements.elapsed_scale()?;
    Some(format!(
        " {} in {:.1} {}",
        count,
        m.elapsed,
        m.scale.duration_label()
    ))
}

/// `" (~<rate> / <unit>)"`
pub fn rate(measurements: &Measurements) -> Option<String> {
    let m = measurements.rate_scale()?;
    Some(format!(" (~{:.1} / {})", m.rate, m.scale.rate_label()))
}

/// `", expected time: ~<eta> <unit>"`
pub fn eta(measurements: &Measurements) -> Option<String> {
    let m = measurements.eta_scale()?;
    Some(format!(
        ", expected time: ~{:.1} {}",
        m.eta,
        m.scale.duration_label()
    ))
}

/// Everything that goes into one line
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub display: &'a DisplayOptions,
    pub count: u64,
    pub target: u64,
    pub measurements: &'a Measurements,
    /// Forced redraw at finish; the ETA is never shown on it
    pub is_final: bool,
}

impl Frame<'_> {
    /// Concatenate the enabled segments, without padding or terminator
    pub fn compose(&self) -> String {
        let mut line = String::new();

        if let Some(prefix) = self.display.prefix.as_deref().filter(|p| !p.is_empty()) {
            line.push_str(prefix);
            line.push(' ');
        }

        if self.target > 0 {
            if self.display.show_percent {
                line.push_str(&percent(self.count, self.target));
            }
            if self.display.show_bar {
                line.push_str(&bar(self.count, self.target));
            }
        }

        if self.display.show_elapsed {
            if let Some(text) = elapsed(self.count, self.measurements) {
                line.push_str(&text);
            }
        }

        if self.display.show_rate {
            if let Some(text) = rate(self.measurements) {
                line.push_str(&text);
            }
        }

        if self.display.show_eta && self.count < self.target && !self.is_final {
            if let Some(text) = eta(self.measurements) {
                line.push_str(&text);
            }
        }

        line
    }
}

/// Pad with trailing spaces up to `width` columns
pub fn pad_to(mut line: String, width: usize) -> String {
    let len = line.chars().count();
    if len < width {
        line.extend(std::iter::repeat(' ').take(width - len));
    }
    line
}
