use anyhow::{Result, anyhow};
use event_log_ingest::{IngestSession, Ingested, setup_logging, write_events};
use std::{env, fs::File, io::BufWriter};

const USAGE: &str = "Usage: event-log-ingest <DATA_LOG.json> [--bulk]";

enum Mode {
    Streaming,
    Bulk,
}

fn main() -> Result<()> {
    setup_logging()?;

    let (path, mode) = parse_args()?;
    let reader = File::open(&path)?;

    let mut session = IngestSession::new();
    let ingested = match mode {
        Mode::Streaming => session.ingest_reader(reader),
        Mode::Bulk => session.ingest_all(reader),
    }
    .map_err(|interrupted| {
        tracing::error!(
            events = interrupted.partial.events.len(),
            "ingestion of {path} stopped early"
        );
        interrupted
    })?;

    write_output(&ingested)
}

fn parse_args() -> Result<(String, Mode)> {
    let mut path = None;
    let mut mode = Mode::Streaming;
    for arg in env::args().skip(1) {
        if arg == "--bulk" {
            mode = Mode::Bulk;
        } else if arg.starts_with("--") {
            return Err(anyhow!("unknown flag {arg}\n{USAGE}"));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(anyhow!(USAGE));
        }
    }
    let path = path.ok_or_else(|| anyhow!(USAGE))?;
    Ok((path, mode))
}

fn write_output(ingested: &Ingested) -> Result<()> {
    let writer = BufWriter::new(std::io::stdout().lock());
    write_events(writer, &ingested.events)?;
    Ok(())
}
