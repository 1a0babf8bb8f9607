//! Streaming decoder for `rg --json` output
//!
//! [`EventStream`] wraps any buffered reader (normally the child's stdout)
//! and yields one [`Event`] per line as soon as the line is complete. The
//! stream is lazy and not restartable. The first malformed line ends it with
//! an error; nothing after it is read.

mod error;
pub mod number;
mod types;

pub use error::DecodeError;
pub use types::{Begin, Data, Elapsed, End, Event, Match, Stats, Submatch, Summary};

use std::io::BufRead;

/// Iterator of decoded events over a line-delimited reader
pub struct EventStream<R> {
    reader: R,
    buf: String,
    line: usize,
    failed: bool,
}

impl<R: BufRead> EventStream<R> {
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    fn next_event(&mut self) -> Option<Result<Event, DecodeError>> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let record = self.buf.trim_end_matches(['\n', '\r']);
            if record.trim().is_empty() {
                continue;
            }

            let line = self.line;
            return Some(Event::from_line(record).map_err(|e| DecodeError::malformed(line, e)));
        }
    }
}

impl<R: BufRead> Iterator for EventStream<R> {
    type Item = Result<Event, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_event();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}
