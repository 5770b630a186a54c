use log::debug;

use super::line_reader::{CancelHandle, ChunkSource, LineReader};

/// Identifies one started sniff within a `SniffSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffTicket(u64);

/// Tracks the sniff of the most recently picked file.
///
/// Each pick gets a fresh ticket and cancels the reader of the previous pick.
/// A result is only accepted for the latest ticket, so a slow sniff of an
/// older file can never overwrite the values of a newer one.
#[derive(Debug, Default)]
pub struct SniffSession {
    generation: u64,
    running: Option<CancelHandle>,
}

impl SniffSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin<S: ChunkSource>(&mut self, reader: &LineReader<S>) -> SniffTicket {
        self.cancel();
        self.generation += 1;
        self.running = Some(reader.cancel_handle());
        SniffTicket(self.generation)
    }

    /// Hands `result` back if `ticket` is still the latest one, `None` otherwise.
    pub fn finish<T>(&mut self, ticket: SniffTicket, result: T) -> Option<T> {
        if !self.is_current(ticket) {
            debug!("dropping result of sniff {}, latest is {}", ticket.0, self.generation);
            return None;
        }
        self.running = None;
        Some(result)
    }

    pub fn is_current(&self, ticket: SniffTicket) -> bool {
        ticket.0 == self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stops the reader of the sniff in progress, if any.
    pub fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            running.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sniff::{CsvSniffResult, CsvSniffer, MemorySource};
    use futures::executor::block_on;

    fn reader(text: &str) -> LineReader<MemorySource> {
        LineReader::new(MemorySource::from(text))
    }

    #[test]
    fn overlapping_sniffs_keep_only_the_latest_pick() {
        let mut session = SniffSession::new();
        let mut first = reader("a,b,text\n");
        let mut second = reader("id,TEXT\n");

        let first_ticket = session.begin(&first);
        let second_ticket = session.begin(&second);
        assert!(first.is_cancelled());
        assert!(session.is_running());

        let second_result = block_on(CsvSniffer::new().sniff(&mut second)).unwrap();
        let first_result = block_on(CsvSniffer::new().sniff(&mut first)).unwrap();

        let accepted = session.finish(second_ticket, second_result).unwrap();
        assert_eq!(accepted.text_column_index, 1);
        assert!(!session.is_running());
        assert_eq!(session.finish(first_ticket, first_result), None);
    }

    #[test]
    fn stale_result_is_dropped_even_when_it_lands_first() {
        let mut session = SniffSession::new();
        let old = session.begin(&reader("x\n"));
        let new = session.begin(&reader("y\n"));

        let late = CsvSniffResult {
            header: Some(vec!["a".to_string(), "text".to_string()]),
            has_header: true,
            text_column_index: 1,
        };
        assert_eq!(session.finish(old, late), None);
        assert!(session.is_running());
        assert_eq!(
            session.finish(new, CsvSniffResult::default()),
            Some(CsvSniffResult::default())
        );
    }

    #[test]
    fn cancel_stops_the_running_reader() {
        let mut session = SniffSession::new();
        let reader = reader("a,b\n");
        let ticket = session.begin(&reader);

        session.cancel();

        assert!(reader.is_cancelled());
        assert!(!session.is_running());
        assert!(session.is_current(ticket));
    }
}
