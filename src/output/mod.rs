//! Module for the results of an ingestion run and their serialization

use std::io::{self, Write};

use crate::domain::{Event, Stats};


/// Everything one ingestion run produced: the events in arrival order and the run's stats.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub events: Vec<Event>,
    pub stats: Stats,
}

impl Ingested {
    pub fn into_parts(self) -> (Vec<Event>, Stats) {
        (self.events, self.stats)
    }
}

/// Writes events as newline-delimited JSON, one event per line, fields in their original order.
pub fn write_events<'a>(
    mut writer: impl Write,
    events: impl IntoIterator<Item = &'a Event>,
) -> io::Result<()> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
