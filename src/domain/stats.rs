//! Module defining the per-run statistics of an ingestion session

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Outcome counters of one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Non-blank physical lines handed to the record assembler
    pub lines_read: usize,
    /// Record candidates handed to the parser, bad ones included
    pub records_attempted: usize,
    /// Records that were opened with a lone `{` line
    pub multiline_records: usize,
    /// Record candidates which were not valid JSON
    pub bad_records: usize,
    /// Events produced
    pub events: usize,
}

/// Counters plus timing of one ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    pub counters: Counters,
    started_at: Instant,
    elapsed: Option<Duration>,
}

impl Stats {
    pub(crate) fn start() -> Self {
        Self {
            counters: Counters::default(),
            started_at: Instant::now(),
            elapsed: None,
        }
    }

    pub(crate) fn finish(&mut self) {
        self.elapsed = Some(self.started_at.elapsed());
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Wall time of the run. While a run is still in progress this is the time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started_at.elapsed())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed.is_some()
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Counters {
            lines_read,
            records_attempted,
            multiline_records,
            bad_records,
            events,
        } = self.counters;
        write!(
            f,
            "loaded {events} events in {:.3} secs (lines: {lines_read}, records: {records_attempted}, multiline: {multiline_records}, bad: {bad_records})",
            self.elapsed().as_secs_f64()
        )
    }
}
