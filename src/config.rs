//! Module for the tunables of an ingestion session

const DEFAULT_CHUNK_SIZE: usize = 8192;
const DEFAULT_EXCERPT_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Bytes requested per read when streaming from a reader. Zero is treated as one.
    pub chunk_size: usize,
    /// Maximum number of characters of a bad record quoted in logs and errors
    pub excerpt_len: usize,
}

impl IngestOptions {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_excerpt_len(mut self, excerpt_len: usize) -> Self {
        self.excerpt_len = excerpt_len;
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            excerpt_len: DEFAULT_EXCERPT_LEN,
        }
    }
}
