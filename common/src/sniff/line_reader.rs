//! Lazy, cancellable line reader over a chunked byte source.
//!
//! Files selected in the browser can be large, and the sniffer only ever needs
//! their first non-empty line. `LineReader` therefore pulls the source one
//! chunk at a time and stops pulling as soon as its `CancelHandle` is
//! triggered, so the cost is proportional to the bytes up to the line that
//! was needed, not to the file size.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to read file: {0}")]
pub struct ReadError(pub String);

/// Random-access byte source with a known length.
#[allow(async_fn_in_trait)]
pub trait ChunkSource {
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads bytes `start..end`; `end` never exceeds `len()`.
    async fn read_chunk(&self, start: u64, end: u64) -> Result<Vec<u8>, ReadError>;
}

/// Bytes already held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl From<&str> for MemorySource {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ChunkSource for MemorySource {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_chunk(&self, start: u64, end: u64) -> Result<Vec<u8>, ReadError> {
        let start = usize::try_from(start).map_err(|e| ReadError(e.to_string()))?;
        let end = usize::try_from(end).map_err(|e| ReadError(e.to_string()))?;
        self.bytes
            .get(start..end)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| ReadError(format!("range {start}..{end} is out of bounds")))
    }
}

/// Shared stop flag of a `LineReader`. Clones control the same reader.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct LineReader<S> {
    source: S,
    chunk_size: u64,
    offset: u64,
    buffer: Vec<u8>,
    lines: VecDeque<String>,
    at_start: bool,
    cancel: CancelHandle,
}

impl<S: ChunkSource> LineReader<S> {
    pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

    pub fn new(source: S) -> Self {
        Self::with_chunk_size(source, Self::DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(source: S, chunk_size: u64) -> Self {
        Self {
            source,
            chunk_size: chunk_size.max(1),
            offset: 0,
            buffer: Vec::new(),
            lines: VecDeque::new(),
            at_start: true,
            cancel: CancelHandle::default(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stops the reader; no further chunk is requested from the source.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Number of bytes pulled from the source so far.
    pub fn bytes_read(&self) -> u64 {
        self.offset
    }

    /// Returns the next line without its terminator, or `None` at the end of
    /// the source or once the reader has been cancelled.
    ///
    /// Lines end at `\n`; a trailing `\r` is dropped, as is a UTF-8 byte order
    /// mark at the start of the source. Invalid UTF-8 is replaced, not rejected.
    pub async fn next_line(&mut self) -> Result<Option<String>, ReadError> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(None);
            }
            if let Some(line) = self.lines.pop_front() {
                return Ok(Some(line));
            }
            if self.offset >= self.source.len() {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let rest = std::mem::take(&mut self.buffer);
                return Ok(Some(self.decode(rest)));
            }

            let end = self
                .offset
                .saturating_add(self.chunk_size)
                .min(self.source.len());
            let chunk = self.source.read_chunk(self.offset, end).await?;
            self.offset = end;
            self.split_lines(&chunk);
        }
    }

    fn split_lines(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.buffer);
                let line = self.decode(line);
                self.lines.push_back(line);
            } else {
                self.buffer.push(byte);
            }
        }
    }

    fn decode(&mut self, mut raw: Vec<u8>) -> String {
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let mut slice = raw.as_slice();
        if std::mem::take(&mut self.at_start) {
            slice = slice.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(slice);
        }
        String::from_utf8_lossy(slice).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn collect_lines<S: ChunkSource>(reader: &mut LineReader<S>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = block_on(reader.next_line()).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn splits_lines_across_chunk_boundaries() {
        let source = MemorySource::from("alpha,beta\r\ngamma\n\ndelta");
        let mut reader = LineReader::with_chunk_size(source, 3);

        assert_eq!(collect_lines(&mut reader), vec!["alpha,beta", "gamma", "", "delta"]);
        assert_eq!(reader.bytes_read(), 24);
    }

    #[test]
    fn keeps_multibyte_characters_split_between_chunks() {
        let mut reader = LineReader::with_chunk_size(MemorySource::from("señal,texto\n"), 3);

        assert_eq!(collect_lines(&mut reader), vec!["señal,texto"]);
    }

    #[test]
    fn strips_byte_order_mark_from_first_line_only() {
        let mut reader = LineReader::new(MemorySource::new(b"\xEF\xBB\xBFid,text\nx".to_vec()));

        assert_eq!(collect_lines(&mut reader), vec!["id,text", "x"]);
    }

    #[test]
    fn cancelled_reader_stops_pulling_chunks() {
        let source = MemorySource::from("first\nsecond\nthird\nfourth\n");
        let mut reader = LineReader::with_chunk_size(source, 8);

        let first = block_on(reader.next_line()).unwrap();
        reader.cancel();

        assert_eq!(first.as_deref(), Some("first"));
        assert_eq!(block_on(reader.next_line()).unwrap(), None);
        assert_eq!(reader.bytes_read(), 8);
    }

    #[test]
    fn cancel_handle_controls_the_reader() {
        let mut reader = LineReader::new(MemorySource::from("a\nb\n"));
        let handle = reader.cancel_handle();

        handle.cancel();

        assert!(reader.is_cancelled());
        assert_eq!(block_on(reader.next_line()).unwrap(), None);
        assert_eq!(reader.bytes_read(), 0);
    }

    #[test]
    fn empty_source_yields_no_lines() {
        let mut reader = LineReader::new(MemorySource::default());
        assert!(collect_lines(&mut reader).is_empty());
    }
}
