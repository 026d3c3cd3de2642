//! Raw semicolon-separated tables as published by Mimer

use crate::core::error::{MimerError, Result};
use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// An ordered list of rows keyed by the header row's column names.
///
/// Cells are kept as the raw strings from the payload; interpretation is left
/// to the normalizers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Parses a `;` separated payload with a header row.
    ///
    /// An empty payload yields an empty table. Rows may be shorter than the
    /// header (Mimer's trailing summary row often is).
    pub fn from_csv(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        debug!(
            columns = headers.len(),
            rows = rows.len(),
            "Parsed raw table"
        );
        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of `name` in the header row.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MimerError::MissingColumn(name.to_string()))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, cells)| Row { index, cells })
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell at `column`, or a `MalformedRow` error naming `name` if the row is
    /// too short.
    pub fn cell(&self, column: usize, name: &str) -> Result<&'a str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| MimerError::MalformedRow {
                row: self.index,
                column: name.to_string(),
                value: String::new(),
            })
    }
}
