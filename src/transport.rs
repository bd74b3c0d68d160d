//! Module for the byte sources a session pulls chunks from

use std::io::{self, ErrorKind, Read};

/// A pull-based source of byte chunks.
///
/// Requesting the next chunk is the only point where a streaming run waits on the outside
/// world. `Ok(None)` signals end-of-stream; an error ends the run. Sources do not retry.
pub trait ChunkSource {
    fn next_chunk(&mut self) -> io::Result<Option<&[u8]>>;
}

impl<S: ChunkSource + ?Sized> ChunkSource for &mut S {
    fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        (**self).next_chunk()
    }
}

/// Reads fixed-size chunks from any [`Read`].
pub struct ReaderSource<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; chunk_size.max(1)],
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(&self.buffer[..n])),
                // a signal, not a failure of the transport
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Adapts an iterator of already-delivered chunks, e.g. from a network client.
pub struct ChunkIter<I> {
    chunks: I,
    current: Vec<u8>,
}

impl<I> ChunkIter<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    pub fn new(chunks: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            chunks: chunks.into_iter(),
            current: Vec::new(),
        }
    }
}

impl<I> ChunkSource for ChunkIter<I>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        match self.chunks.next() {
            None => Ok(None),
            Some(chunk) => {
                self.current = chunk?;
                Ok(Some(&self.current))
            }
        }
    }
}
