//! Incremental UTF-8 decoding of transport chunks.

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Turns a sequence of byte chunks into text.
///
/// A multi-byte sequence cut by a chunk edge is held back until the next chunk completes it.
/// Invalid bytes are replaced by U+FFFD; decoding never fails.
#[derive(Debug, Default)]
pub(crate) struct Decoder {
    leftover: Vec<u8>,
}

impl Decoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn decode(&mut self, chunk: &[u8]) -> String {
        if self.leftover.is_empty() {
            return self.decode_from(chunk);
        }
        let mut joined = std::mem::take(&mut self.leftover);
        joined.extend_from_slice(chunk);
        self.decode_from(&joined)
    }

    /// Emits whatever is still held back. An incomplete trailing sequence becomes U+FFFD.
    pub(crate) fn flush(&mut self) -> String {
        let leftover = std::mem::take(&mut self.leftover);
        String::from_utf8_lossy(&leftover).into_owned()
    }

    fn decode_from(&mut self, mut bytes: &[u8]) -> String {
        let mut text = String::with_capacity(bytes.len());
        loop {
            match std::str::from_utf8(bytes) {
                Ok(valid) => {
                    text.push_str(valid);
                    return text;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    text.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(invalid_len) => {
                            text.push(REPLACEMENT);
                            bytes = &rest[invalid_len..];
                        }
                        None => {
                            // sequence cut by the chunk edge, wait for the rest
                            self.leftover.extend_from_slice(rest);
                            return text;
                        }
                    }
                }
            }
        }
    }
}
