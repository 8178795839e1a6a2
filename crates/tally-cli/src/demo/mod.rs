//! The two demo runs.

use std::io::Write;
use std::thread;
use std::time::Duration;

use tally_core::{ProgressIndicator, Settings};
use tracing::info;

use crate::Cli;

/// Count to the total (or `--stop-at`), then finish or remove the line
pub fn run_bounded(cli: &Cli, settings: &Settings) {
    let steps = cli.stop_at.unwrap_or(cli.total);
    info!(
        "Bounded run: {} of {} steps on {} thread(s)",
        steps,
        cli.total,
        cli.threads.max(1)
    );

    let indicator = ProgressIndicator::with_settings(cli.total, settings.clone());
    drive(&indicator, steps, cli.threads, cli.delay_ms);

    if cli.remove {
        indicator.remove();
    } else {
        indicator.finish(cli.enforce);
    }
}

/// Count without a known total; drop draws the last line
pub fn run_unbounded(cli: &Cli, settings: &Settings) {
    let steps = cli.stop_at.unwrap_or(cli.total);
    info!("Unbounded run: {} steps", steps);

    let indicator = ProgressIndicator::with_settings(0, settings.clone());
    drive(&indicator, steps, cli.threads, cli.delay_ms);
}

/// Split `steps` increments across `threads` workers
pub fn drive<W: Write + Send>(
    indicator: &ProgressIndicator<W>,
    steps: u64,
    threads: usize,
    delay_ms: u64,
) {
    let workers = threads.max(1) as u64;
    let delay = Duration::from_millis(delay_ms);

    thread::scope(|scope| {
        for worker in 0..workers {
            let share = steps / workers + u64::from(worker < steps % workers);
            scope.spawn(move || {
                for _ in 0..share {
                    indicator.increment();
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::SharedBuffer;

    #[test]
    fn test_drive_counts_every_step() {
        let buffer = SharedBuffer::new();
        let indicator = ProgressIndicator::with_writer(103, buffer.clone());

        drive(&indicator, 103, 4, 0);

        assert_eq!(indicator.count(), 103);
    }

    #[test]
    fn test_drive_with_zero_threads_uses_one() {
        let indicator = ProgressIndicator::with_writer(0, SharedBuffer::new());

        drive(&indicator, 10, 0, 0);

        assert_eq!(indicator.count(), 10);
    }

    #[test]
    fn test_drive_then_finish_writes_final_line() {
        let buffer = SharedBuffer::new();
        let indicator = ProgressIndicator::with_writer(25, buffer.clone());

        drive(&indicator, 25, 2, 0);
        indicator.finish(false);

        assert_eq!(buffer.newlines(), 1);
        assert!(buffer.frames().last().unwrap().starts_with(" 100% ["));
    }
}
