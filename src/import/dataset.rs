//! Uploaded dataset parsing
//!
//! Reads the comma-separated format the form collaborator uploads: a
//! header row naming columns, then data rows. Every cell is kept as text.
//! The reader is tolerant: quoted cells may contain commas, line breaks,
//! and doubled quotes; short rows are padded with empty cells; cells past
//! the header are dropped; blank lines are skipped.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// An uploaded tabular dataset: named columns over rows of text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse CSV text. The first record is the header. Parsing never
    /// fails; empty input is an empty dataset.
    pub fn parse(text: &str) -> Self {
        let mut records = parse_records(text);
        if records.is_empty() {
            return Self {
                columns: Vec::new(),
                rows: Vec::new(),
            };
        }
        let columns = records.remove(0);
        let width = columns.len();
        let rows = records
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Self { columns, rows }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one data row, in column order.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub(crate) fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::InvalidColumn(name.to_string()))
    }

    pub(crate) fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Distinct values of `column` in order of first appearance, for
    /// populating the task-name picker.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<String>> {
        Ok(self.distinct_at(self.column_index(column)?))
    }

    pub(crate) fn distinct_at(&self, col: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for row in &self.rows {
            if seen.insert(row[col].clone()) {
                values.push(row[col].clone());
            }
        }
        values
    }
}

/// Split CSV text into records of cells, honoring quoted cells.
fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut cell)),
                // CRLF line endings end the record at the '\n'
                '\r' => {}
                '\n' => {
                    if record.is_empty() && cell.is_empty() {
                        continue;
                    }
                    record.push(std::mem::take(&mut cell));
                    records.push(std::mem::take(&mut record));
                }
                _ => cell.push(c),
            }
        }
    }
    if !cell.is_empty() || !record.is_empty() {
        record.push(cell);
        records.push(record);
    }
    records
}
