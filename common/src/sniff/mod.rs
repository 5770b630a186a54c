//! First-line inspection of CSV files.
//!
//! When a CSV file is picked for a new collection, the form pre-fills whether
//! the file has a header and which column holds the document text. Only the
//! first non-empty line is looked at: it is parsed as one CSV record, a
//! `HeaderHeuristic` decides whether it is a header, and, if so, the first
//! column named `text` (ignoring ASCII case) becomes the text column.

mod heuristic;
mod line_reader;
mod session;

pub use heuristic::{HeaderHeuristic, MultiColumnHeuristic};
pub use line_reader::{CancelHandle, ChunkSource, LineReader, MemorySource, ReadError};
pub use session::{SniffSession, SniffTicket};

use csv::ReaderBuilder;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header name identifying the text column.
pub const TEXT_COLUMN_NAME: &str = "text";

/// What the sniffer learned from the first non-empty line of a file.
///
/// `text_column_index` is only meaningful when `has_header` is set and is `0`
/// otherwise. `header` is `None` when the file had no non-empty line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CsvSniffResult {
    pub header: Option<Vec<String>>,
    pub has_header: bool,
    pub text_column_index: usize,
}

#[derive(Debug, Error)]
pub enum SniffError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("first line is not valid CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Default)]
pub struct CsvSniffer<H = MultiColumnHeuristic> {
    heuristic: H,
}

impl CsvSniffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: HeaderHeuristic> CsvSniffer<H> {
    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    /// Reads lines until the first non-empty one, cancels the reader and
    /// derives the result from that line alone.
    pub async fn sniff<S: ChunkSource>(
        &self,
        reader: &mut LineReader<S>,
    ) -> Result<CsvSniffResult, SniffError> {
        while let Some(line) = reader.next_line().await? {
            if !line.is_empty() {
                reader.cancel();
                debug!("sniffing first line after {} byte(s)", reader.bytes_read());
                return self.sniff_line(&line);
            }
        }
        debug!("no non-empty line found, nothing to sniff");
        Ok(CsvSniffResult::default())
    }

    /// Derives the result from a single line.
    pub fn sniff_line(&self, line: &str) -> Result<CsvSniffResult, SniffError> {
        let fields = parse_record(line)?;
        let has_header = self.heuristic.has_header(&fields);
        let text_column_index = if has_header {
            find_text_column(&fields).unwrap_or(0)
        } else {
            0
        };
        Ok(CsvSniffResult {
            header: Some(fields),
            has_header,
            text_column_index,
        })
    }
}

/// Parses `line` as exactly one CSV record; extra lines are ignored.
pub fn parse_record(line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

/// Position of the first field named `text`, ignoring ASCII case.
pub fn find_text_column(fields: &[String]) -> Option<usize> {
    fields
        .iter()
        .position(|field| field.eq_ignore_ascii_case(TEXT_COLUMN_NAME))
}
