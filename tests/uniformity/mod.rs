//! Property tests checking that bulk and streaming ingestion agree on any input and any way the
//! input is cut into chunks.

use std::io;

use event_log_ingest::{ChunkIter, IngestSession, Ingested};
use proptest::prelude::*;

use crate::{MIXED_LOG, fixture_path};

/// Cuts `bytes` at the given offsets (taken modulo the input length).
fn cut(bytes: &[u8], offsets: &[usize]) -> Vec<io::Result<Vec<u8>>> {
    let mut points: Vec<usize> = offsets
        .iter()
        .map(|o| if bytes.is_empty() { 0 } else { o % bytes.len() })
        .collect();
    points.push(0);
    points.push(bytes.len());
    points.sort_unstable();
    points.dedup();

    points
        .windows(2)
        .map(|w| Ok(bytes[w[0]..w[1]].to_vec()))
        .collect()
}

fn assert_uniform(bytes: &[u8], offsets: &[usize]) {
    let loaded: Ingested = IngestSession::new().ingest_bytes(bytes);
    let streamed = IngestSession::new()
        .ingest_stream(ChunkIter::new(cut(bytes, offsets)))
        .expect("in-memory chunks cannot fail");

    assert_eq!(streamed.events, loaded.events);
    assert_eq!(streamed.stats.counters, loaded.stats.counters);
}

/// One physical line of a synthetic log, in any of the shapes the writer (or corruption) produces.
fn log_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000, prop::option::of(0.0f64..100.0)).prop_map(|(id, rate)| match rate {
            Some(rate) => format!(r#"{{"post":{{"id":{id}}},"rate":{rate}}}"#),
            None => format!(r#"{{"post":{{"id":{id}}}}}"#),
        }),
        (0u32..1000).prop_map(|id| format!("{{\n\"post\":{{\"id\":{id}}},\n\"type\":\"rtweb_post\"\n}}")),
        Just(r#"{"post":null}"#.to_string()),
        Just("".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        "[a-z ]{1,12}",
        "\\PC{0,8}",
    ]
}

proptest! {
    #[test]
    fn bulk_and_streaming_agree_on_synthetic_logs(
        lines in prop::collection::vec(log_line(), 0..40),
        crlf in any::<bool>(),
        trailing_newline in any::<bool>(),
        offsets in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let separator = if crlf { "\r\n" } else { "\n" };
        let mut text = lines.join(separator);
        if trailing_newline {
            text.push_str(separator);
        }
        assert_uniform(text.as_bytes(), &offsets);
    }

    #[test]
    fn bulk_and_streaming_agree_on_arbitrary_bytes(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
        offsets in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        assert_uniform(&bytes, &offsets);
    }

    #[test]
    fn bulk_and_streaming_agree_on_the_fixture(
        offsets in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let bytes = std::fs::read(fixture_path("sample_log.json")).expect("fixture exists");
        assert_uniform(&bytes, &offsets);
    }
}

#[test]
fn mixed_log_one_byte_at_a_time() {
    let offsets: Vec<usize> = (0..MIXED_LOG.len()).collect();
    assert_uniform(MIXED_LOG.as_bytes(), &offsets);
}

#[test]
fn cut_covers_input_exactly() {
    let chunks = cut(b"abcdef", &[4, 2, 10, 2]);
    let joined: Vec<u8> = chunks.into_iter().flat_map(|c| c.unwrap()).collect();
    assert_eq!(joined, b"abcdef");
}
