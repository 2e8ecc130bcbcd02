/*!
Splits dataset dumps into `attribute: value` records.

Lines without a colon (continuation lines, blank lines, comments without a colon) are skipped
without ending the current object, and never produce an error. Only failures of the underlying
reader are surfaced, so that a truncated download does not silently yield partial statistics.
*/
use crate::error::InetStatsError;
use crate::io::get_reader;
use crate::parser::utils::decode_latin1;
use log::debug;
use std::io::{BufRead, ErrorKind};

/// One `attribute: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Text before the first colon, as-is.
    pub attr: String,
    /// Text after the first colon, trimmed.
    pub value: String,
}

impl Record {
    pub fn new(attr: impl Into<String>, value: impl Into<String>) -> Record {
        Record {
            attr: attr.into(),
            value: value.into(),
        }
    }

    /// Splits a line on its first colon. Returns `None` for lines without one.
    pub fn parse_line(line: &str) -> Option<Record> {
        let (attr, value) = line.split_once(':')?;
        Some(Record::new(attr, value.trim()))
    }
}

/// Lazy iterator of [Record]s over a buffered reader.
pub struct RecordReader<R> {
    reader: R,
    buf: Vec<u8>,
    lines: u64,
    skipped: u64,
    done: bool,
}

impl<R> RecordReader<R> {
    pub fn new(reader: R) -> RecordReader<R> {
        RecordReader {
            reader,
            buf: Vec::new(),
            lines: 0,
            skipped: 0,
            done: false,
        }
    }

    /// Number of lines read so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Number of lines skipped so far because they had no colon.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl RecordReader<Box<dyn BufRead + Send>> {
    /// Opens a dump located locally or remotely; `.gz` files are decompressed on the fly.
    pub fn from_path(path: &str) -> Result<Self, InetStatsError> {
        Ok(RecordReader::new(get_reader(path)?))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, InetStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.done = true;
                }
                Ok(_) => {
                    self.lines += 1;
                    let line = decode_latin1(&self.buf);
                    match Record::parse_line(&line) {
                        Some(record) => return Some(Ok(record)),
                        None => {
                            self.skipped += 1;
                        }
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!("reader failed after {} lines: {}", self.lines, e);
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}
