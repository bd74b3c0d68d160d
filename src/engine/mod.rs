//! Module for the orchestration of one ingestion run over one resource

use std::io::Read;

use tracing::info;

use crate::{
    Error, IngestOptions, Interrupted,
    domain::Event,
    output::Ingested,
    transport::{ChunkSource, ReaderSource},
};

mod pipeline;


use pipeline::Pipeline;

type EventHandler<'h> = Box<dyn FnMut(&Event) + 'h>;

/// Owns everything one ingestion run needs: options, the optional event subscriber, and (for the
/// duration of a run) all pipeline buffers and counters.
///
/// Every run starts from fresh state, so a session can be reused; the subscriber and options
/// stay registered between runs. Sessions share nothing with each other.
pub struct IngestSession<'h> {
    options: IngestOptions,
    handler: Option<EventHandler<'h>>,
}

impl<'h> IngestSession<'h> {
    pub fn new() -> Self {
        Self::with_options(IngestOptions::default())
    }

    pub fn with_options(options: IngestOptions) -> Self {
        Self {
            options,
            handler: None,
        }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Registers the subscriber notified once per produced event, replacing any previous one.
    pub fn set_event_handler(&mut self, handler: impl FnMut(&Event) + 'h) {
        self.handler = Some(Box::new(handler));
    }

    pub fn clear_event_handler(&mut self) {
        self.handler = None;
    }

    pub fn has_event_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Bulk mode: reads the whole resource into memory, then runs the pipeline over it.
    ///
    /// The subscriber, if any, is notified for every event in order once the run is complete.
    pub fn ingest_all(&mut self, mut resource: impl Read) -> Result<Ingested, Interrupted> {
        let mut bytes = Vec::new();
        if let Err(err) = resource.read_to_end(&mut bytes) {
            return Err(Interrupted {
                error: Error::Transport(err),
                partial: Pipeline::new(&self.options).into_ingested(),
            });
        }
        drop(resource);
        Ok(self.ingest_bytes(&bytes))
    }

    /// Bulk mode over a buffer that is already in memory.
    pub fn ingest_bytes(&mut self, bytes: &[u8]) -> Ingested {
        info!(mode = "bulk", bytes = bytes.len(), "ingesting event log");
        let mut pipeline = Pipeline::new(&self.options);
        pipeline.push_chunk(bytes, &mut |_: &Event| {});
        pipeline.finish(&mut |_: &Event| {});
        let ingested = pipeline.into_ingested();

        if let Some(handler) = self.handler.as_mut() {
            for event in &ingested.events {
                handler(event);
            }
        }
        ingested
    }

    /// Streaming mode: pulls chunks from `source` until end-of-stream, notifying the subscriber
    /// as soon as each event is produced.
    ///
    /// A transport error ends the run; whatever was produced up to then is returned inside the
    /// [`Interrupted`] error. The source is owned by the run and released on every path.
    pub fn ingest_stream(&mut self, mut source: impl ChunkSource) -> Result<Ingested, Interrupted> {
        info!(mode = "streaming", "ingesting event log");
        let mut pipeline = Pipeline::new(&self.options);
        let handler = &mut self.handler;
        let mut notify = |event: &Event| {
            if let Some(handler) = handler.as_mut() {
                handler(event)
            }
        };

        loop {
            match source.next_chunk() {
                Ok(Some(chunk)) => pipeline.push_chunk(chunk, &mut notify),
                Ok(None) => break,
                Err(err) => {
                    return Err(Interrupted {
                        error: Error::Transport(err),
                        partial: pipeline.into_ingested(),
                    });
                }
            }
        }
        pipeline.finish(&mut notify);
        Ok(pipeline.into_ingested())
    }

    /// Streaming mode over a reader, read in chunks of [`IngestOptions::chunk_size`] bytes.
    pub fn ingest_reader(&mut self, reader: impl Read) -> Result<Ingested, Interrupted> {
        let source = ReaderSource::new(reader, self.options.chunk_size);
        self.ingest_stream(source)
    }
}

impl Default for IngestSession<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IngestSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestSession")
            .field("options", &self.options)
            .field("has_event_handler", &self.has_event_handler())
            .finish()
    }
}
