//! Module for the per-run pipeline shared by bulk and streaming ingestion.
//!
//! Both modes push bytes through the very same [`Pipeline`], which is what makes their results
//! identical for identical input.

use tracing::{debug, info, warn};

use crate::{
    IngestOptions,
    domain::{Event, Stats},
    input::{Decoder, Framing, LineSplitter, RecordAssembler, Step, parse_record},
    output::Ingested,
};

pub(crate) struct Pipeline {
    decoder: Decoder,
    splitter: LineSplitter,
    assembler: RecordAssembler,
    events: Vec<Event>,
    stats: Stats,
    excerpt_len: usize,
}

impl Pipeline {
    pub(crate) fn new(options: &IngestOptions) -> Self {
        Self {
            decoder: Decoder::new(),
            splitter: LineSplitter::new(),
            assembler: RecordAssembler::new(),
            events: Vec::new(),
            stats: Stats::start(),
            excerpt_len: options.excerpt_len,
        }
    }

    /// Runs a chunk through every stage. `on_event` sees each event right after it is appended.
    pub(crate) fn push_chunk(&mut self, chunk: &[u8], on_event: &mut dyn FnMut(&Event)) {
        let text = self.decoder.decode(chunk);
        self.push_text(&text, on_event);
    }

    /// Flushes the decoder and the line splitter at end-of-stream.
    pub(crate) fn finish(&mut self, on_event: &mut dyn FnMut(&Event)) {
        let text = self.decoder.flush();
        self.push_text(&text, on_event);

        if let Some(line) = self.splitter.finish() {
            self.handle_line(line, on_event);
        }

        // An unterminated multi-line record is dropped silently. Likely a writer crash mid-record.
        if let Some(text) = self.assembler.abandon() {
            debug!(
                bytes = text.len(),
                "dropping unterminated multi-line record at end of stream"
            );
        }
    }

    /// Finalizes the stats and hands the results over.
    pub(crate) fn into_ingested(mut self) -> Ingested {
        self.stats.finish();
        let counters = self.stats.counters;
        info!(
            lines_read = counters.lines_read,
            records = counters.records_attempted,
            multiline_records = counters.multiline_records,
            bad_records = counters.bad_records,
            events = counters.events,
            "{}",
            self.stats
        );
        Ingested {
            events: self.events,
            stats: self.stats,
        }
    }

    fn push_text(&mut self, text: &str, on_event: &mut dyn FnMut(&Event)) {
        for line in self.splitter.feed(text) {
            self.handle_line(line, on_event);
        }
    }

    fn handle_line(&mut self, line: String, on_event: &mut dyn FnMut(&Event)) {
        if line.trim().is_empty() {
            return;
        }
        let counters = &mut self.stats.counters;
        counters.lines_read += 1;
        let line_index = counters.lines_read;

        let (text, framing) = match self.assembler.push(line) {
            Step::Opened => {
                counters.multiline_records += 1;
                return;
            }
            Step::Buffered => return,
            Step::Line(text) => (text, Framing::Line),
            Step::Block(text) => (text, Framing::Block),
        };

        counters.records_attempted += 1;
        match parse_record(&text, framing, line_index, self.excerpt_len) {
            Ok(Some(event)) => {
                counters.events += 1;
                self.events.push(event);
                if let Some(event) = self.events.last() {
                    on_event(event);
                }
            }
            Ok(None) => {}
            Err(err) => {
                counters.bad_records += 1;
                warn!(line = line_index, "skipping record: {err}");
            }
        }
    }
}
