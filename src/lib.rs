mod config;
mod domain;
mod engine;
mod error;
mod input;
mod output;
mod telemetry;
mod transport;

pub use config::IngestOptions;
pub use domain::{Counters, DEFAULT_EVENT_TYPE, Event, Stats};
pub use engine::IngestSession;
pub use error::{Error, Interrupted};
pub use output::{Ingested, write_events};
pub use telemetry::setup_logging;
pub use transport::{ChunkIter, ChunkSource, ReaderSource};

/// Loads a whole newline-delimited JSON event log at once and returns its events with the run's stats.
///
/// Records may span several lines when written as a lone `{` line, the interior lines, and a
/// lone `}` line. Records without a `post` are skipped, and records that are not valid JSON are
/// logged and counted in [`Counters::bad_records`] without stopping the run.
///
/// # Errors
///
/// Only a failure to read `reader` ends the run early. The [`Interrupted`] error then carries
/// the partial results.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// let reader = File::open("DATA_LOG.json").unwrap();
/// let ingested = event_log_ingest::ingest_all(reader).unwrap();
/// println!("{}", ingested.stats);
/// ```
pub fn ingest_all(reader: impl std::io::Read) -> Result<Ingested, Interrupted> {
    IngestSession::new().ingest_all(reader)
}

/// Streams a newline-delimited JSON event log, calling `on_event` for every event as soon as it
/// has been parsed.
///
/// Produces exactly the events and counters [`ingest_all`] produces for the same bytes.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
///
/// let reader = File::open("DATA_LOG.json").unwrap();
/// let ingested = event_log_ingest::ingest_stream(reader, |event| {
///     println!("{} at {:?}", event.event_type().unwrap_or("?"), event.pt());
/// })
/// .unwrap();
/// assert_eq!(ingested.events.len(), ingested.stats.counters.events);
/// ```
pub fn ingest_stream(
    reader: impl std::io::Read,
    on_event: impl FnMut(&Event),
) -> Result<Ingested, Interrupted> {
    let mut session = IngestSession::new();
    session.set_event_handler(on_event);
    session.ingest_reader(reader)
}
