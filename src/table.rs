//! Header-indexed reader for the tab-delimited tables the prediction
//! tools write.
//!
//! Columns are looked up by header name, so extra or reordered columns in
//! upstream output are tolerated. A zero-byte file has no header and no
//! rows; callers treat that the same as a header-only table.

use crate::error::{MergerError, Result};
use memchr::memchr_iter;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

/// A streaming reader over a tab-delimited table with a header line.
pub struct TableReader<R: Read> {
    reader: BufReader<R>,
    source: String,
    header: Option<Vec<String>>,
    line_number: usize,
    buffer: String,
}

impl TableReader<File> {
    /// Open a table from a path and consume its header line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::new(file, path.display().to_string())
    }
}

impl<R: Read> TableReader<R> {
    /// Wrap any readable source. `source` names the input in error messages.
    pub fn new(reader: R, source: impl Into<String>) -> Result<Self> {
        let mut table = Self {
            reader: BufReader::new(reader),
            source: source.into(),
            header: None,
            line_number: 0,
            buffer: String::with_capacity(1024),
        };
        table.header = table
            .next_line()?
            .map(|line| split_fields(&line).into_iter().map(str::to_string).collect());
        Ok(table)
    }

    /// Name of the input, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// False when the input was completely empty.
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Index of a named column.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .as_ref()
            .and_then(|h| h.iter().position(|c| c == name))
            .ok_or_else(|| MergerError::MissingColumn {
                source_file: self.source.clone(),
                column: name.to_string(),
            })
    }

    /// Read the next non-blank data row.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        match self.next_line()? {
            Some(line) => Ok(Some(Row {
                line: self.line_number,
                fields: split_fields(&line).into_iter().map(str::to_string).collect(),
            })),
            None => Ok(None),
        }
    }

    /// Iterator over all remaining rows.
    pub fn rows(self) -> RowIter<R> {
        RowIter { reader: self }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            self.buffer.clear();
            let bytes_read = match self.reader.read_line(&mut self.buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Err(MergerError::parse(
                        &self.source,
                        self.line_number + 1,
                        "Line is not valid UTF-8",
                    ));
                }
                Err(e) => return Err(e.into()),
            };
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim_end_matches(&['\n', '\r'][..]);
            if line.trim().is_empty() {
                continue;
            }
            return Ok(Some(line.to_string()));
        }
    }
}

/// Iterator over table rows.
pub struct RowIter<R: Read> {
    reader: TableReader<R>,
}

impl<R: Read> Iterator for RowIter<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}

/// One data row, with the 1-based line number it came from.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    /// Raw value of a column.
    pub fn get(&self, source: &str, index: usize, name: &str) -> Result<&str> {
        self.fields.get(index).map(String::as_str).ok_or_else(|| {
            MergerError::parse(
                source,
                self.line,
                format!(
                    "Expected a '{}' value in field {}, got {} fields",
                    name,
                    index + 1,
                    self.fields.len()
                ),
            )
        })
    }

    /// Value of a column parsed as a non-negative integer.
    pub fn get_u64(&self, source: &str, index: usize, name: &str) -> Result<u64> {
        let raw = self.get(source, index, name)?;
        parse_position(raw).ok_or_else(|| {
            MergerError::parse(
                source,
                self.line,
                format!("Invalid {} value: '{}'", name, raw),
            )
        })
    }
}

/// Parse an integer coordinate, tolerating surrounding whitespace.
pub fn parse_position(s: &str) -> Option<u64> {
    s.trim().parse().ok()
}

/// Split a line on tabs.
fn split_fields(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(16);
    let mut last = 0;
    for tab in memchr_iter(b'\t', bytes) {
        fields.push(&line[last..tab]);
        last = tab + 1;
    }
    fields.push(&line[last..]);
    fields
}
