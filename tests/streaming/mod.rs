//! Integration tests for ingesting a log while it streams in

use std::cell::RefCell;
use std::io;

use claims::{assert_err, assert_ok};
use event_log_ingest::{ChunkIter, Error, Event, IngestOptions, IngestSession, ingest_stream};
use serde_json::json;

use crate::{MIXED_LOG, bulk, counters};

#[test]
fn mixed_log_with_callback() {
    let mut seen: Vec<Event> = Vec::new();
    let ingested = assert_ok!(ingest_stream(MIXED_LOG.as_bytes(), |event| seen.push(event.clone())));

    assert_eq!(ingested.stats.counters, counters(6, 4, 1, 1, 2));
    assert_eq!(seen, ingested.events);
}

#[test]
fn final_chunk_without_newline_still_yields_its_record() {
    let chunks: Vec<io::Result<Vec<u8>>> = vec![
        Ok(b"{\"post\":1}\n{\"po".to_vec()),
        Ok(b"st\":2}".to_vec()),
    ];
    let ingested = assert_ok!(IngestSession::new().ingest_stream(ChunkIter::new(chunks)));

    let posts: Vec<_> = ingested.events.iter().map(|e| e.post().clone()).collect();
    assert_eq!(posts, [json!(1), json!(2)]);
}

#[test]
fn multiline_record_split_across_chunks() {
    let chunks: Vec<io::Result<Vec<u8>>> = vec![
        Ok(b"{\n\"po".to_vec()),
        Ok(b"st\":{\"id\":2}".to_vec()),
        Ok(b"}\n".to_vec()),
        Ok(b"}".to_vec()),
        Ok(b"\n".to_vec()),
    ];
    let ingested = assert_ok!(IngestSession::new().ingest_stream(ChunkIter::new(chunks)));

    assert_eq!(ingested.stats.counters, counters(3, 1, 1, 0, 1));
    assert_eq!(ingested.events[0].post(), &json!({ "id": 2 }));
}

#[test]
fn events_are_pushed_before_the_stream_ends() {
    let notified_at = RefCell::new(Vec::new());
    let requested = RefCell::new(0usize);

    let mut session = IngestSession::new();
    session.set_event_handler(|_| notified_at.borrow_mut().push(*requested.borrow()));

    let chunks = ["{\"post\":1}\n", "{\"post\":2}\n", "{\"post\":3}\n"]
        .into_iter()
        .map(|c| Ok::<_, io::Error>(c.as_bytes().to_vec()))
        .inspect(|_| *requested.borrow_mut() += 1);
    let source = ChunkIter::new(chunks);

    assert_ok!(session.ingest_stream(source));
    drop(session);

    // event n was delivered while only n chunks had been requested
    assert_eq!(notified_at.into_inner(), [1, 2, 3]);
}

#[test]
fn interrupted_stream_keeps_what_was_ingested() {
    let chunks: Vec<io::Result<Vec<u8>>> = vec![
        Ok(b"{\"post\":1}\n{\n\"post\":2".to_vec()),
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed")),
    ];
    let interrupted = assert_err!(IngestSession::new().ingest_stream(ChunkIter::new(chunks)));

    assert!(matches!(interrupted.error, Error::Transport(_)));
    assert_eq!(interrupted.partial.events.len(), 1);
    assert_eq!(interrupted.partial.stats.counters, counters(2, 1, 1, 0, 1));
    assert!(interrupted.to_string().contains("after 1 events"));
}

#[test]
fn small_reads_from_a_reader() {
    let options = IngestOptions::default().with_chunk_size(1);
    let streamed = assert_ok!(IngestSession::with_options(options).ingest_reader(MIXED_LOG.as_bytes()));
    let loaded = bulk(MIXED_LOG);

    assert_eq!(streamed.events, loaded.events);
    assert_eq!(streamed.stats.counters, loaded.stats.counters);
}
