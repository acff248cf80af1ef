//! §10.2 — Drop-triggered batch/command logging, mirroring sqlx-core's own
//! `QueryLogger` (`sqlx-core/src/logger.rs`): accumulate stats while the
//! batch runs, emit one summary line when the logger is dropped rather than
//! logging eagerly at each step, and escalate the log level once execution
//! takes longer than a threshold.

use std::time::{Duration, Instant};

use log::Level;

const SLOW_BATCH_THRESHOLD: Duration = Duration::from_millis(1000);

/// Accumulates per-batch stats and logs a single summary line on drop.
/// Constructed at the top of `Batch::execute_reader`/`execute_non_query` and
/// left to fall out of scope when the call returns.
pub(crate) struct BatchLogger {
    sql_summary: String,
    start: Instant,
    commands: usize,
    rows_returned: u64,
    rows_affected: u64,
}

impl BatchLogger {
    pub(crate) fn new(sql_summary: String) -> Self {
        BatchLogger {
            sql_summary,
            start: Instant::now(),
            commands: 0,
            rows_returned: 0,
            rows_affected: 0,
        }
    }

    pub(crate) fn increment_command(&mut self) {
        self.commands += 1;
    }

    pub(crate) fn add_rows_returned(&mut self, rows: u64) {
        self.rows_returned += rows;
    }

    pub(crate) fn add_rows_affected(&mut self, rows: u64) {
        self.rows_affected += rows;
    }
}

impl Drop for BatchLogger {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let level = if elapsed >= SLOW_BATCH_THRESHOLD {
            Level::Warn
        } else {
            Level::Debug
        };

        log::log!(
            level,
            "{}; commands: {}, rows returned: {}, rows affected: {}, elapsed: {:?}{}",
            self.sql_summary,
            self.commands,
            self.rows_returned,
            self.rows_affected,
            elapsed,
            if level == Level::Warn { " (slow batch)" } else { "" },
        );
    }
}
