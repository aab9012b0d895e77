//! A collection of rows sharing one column schema.

use crate::error::RecordError;
use crate::record::Record;
use std::ops::{Bound, RangeBounds};
use tally_types::Value;

/// Rows are stored as plain value vectors; the column names live once on
/// the table. Every record handed out is an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Table {
    column_names: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<A, S>(column_names: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_names: column_names.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_data<A, S, R, I, V>(column_names: A, rows: R) -> Result<Self, RecordError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Self::new(column_names);
        for row in rows {
            table.push(row)?;
        }
        Ok(table)
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns: the schema width, or the widest row for a table
    /// without column names.
    pub fn width(&self) -> usize {
        if self.column_names.is_empty() {
            self.rows.iter().map(Vec::len).max().unwrap_or(0)
        } else {
            self.column_names.len()
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Appends a positional row.
    pub fn push<I, V>(&mut self, row: I) -> Result<(), RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if !self.column_names.is_empty() && row.len() != self.column_names.len() {
            return Err(RecordError::Schema(format!(
                "row has {} values but the table has {} columns",
                row.len(),
                self.column_names.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a record. Named records are matched to the columns by name,
    /// with absent names becoming `Null`; positional records are appended
    /// as they are.
    pub fn push_record(&mut self, record: &Record) -> Result<(), RecordError> {
        if record.has_attributes() && !self.column_names.is_empty() {
            let row: Vec<Value> = self
                .column_names
                .iter()
                .map(|name| record.get(name.as_str()).ok().flatten().cloned().unwrap_or_default())
                .collect();
            self.rows.push(row);
            Ok(())
        } else {
            self.push(record.to_vec())
        }
    }

    pub fn set_column_names<A, S>(&mut self, column_names: A) -> Result<(), RecordError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = column_names.into_iter().map(Into::into).collect();
        if !names.is_empty() {
            if let Some(row) = self.rows.iter().find(|r| r.len() != names.len()) {
                return Err(RecordError::Schema(format!(
                    "{} column names given but a row has {} values",
                    names.len(),
                    row.len()
                )));
            }
        }
        self.column_names = names;
        Ok(())
    }

    /// An independent record for row `index`.
    pub fn record(&self, index: usize) -> Result<Record, RecordError> {
        let row = self.rows.get(index).ok_or(RecordError::OutOfRange {
            index,
            len: self.rows.len(),
        })?;
        Record::with_attributes(row.iter().cloned(), self.column_names.iter().cloned())
    }

    pub fn records(&self) -> Result<Vec<Record>, RecordError> {
        (0..self.rows.len()).map(|i| self.record(i)).collect()
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<Value>, RecordError> {
        let i = self
            .column_index(name)
            .ok_or_else(|| RecordError::NoSuchAttribute(name.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(i).cloned().unwrap_or_default())
            .collect())
    }

    fn bounds<R: RangeBounds<usize>>(&self, range: &R) -> (usize, usize) {
        let len = self.rows.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        let end = end.min(len);
        (start.min(end), end)
    }

    /// Keeps only the rows inside `range`, in place. Bounds past the end are
    /// clamped.
    pub fn reduce<R: RangeBounds<usize>>(&mut self, range: R) -> &mut Self {
        let (start, end) = self.bounds(&range);
        self.rows.truncate(end);
        self.rows.drain(..start);
        self
    }

    /// A copy holding only the rows inside `range`.
    pub fn sub_table<R: RangeBounds<usize>>(&self, range: R) -> Table {
        let (start, end) = self.bounds(&range);
        Table {
            column_names: self.column_names.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// A copy without the named column.
    pub fn without_column(&self, name: &str) -> Result<Table, RecordError> {
        let i = self
            .column_index(name)
            .ok_or_else(|| RecordError::NoSuchAttribute(name.to_string()))?;
        let mut column_names = self.column_names.clone();
        column_names.remove(i);
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if i < row.len() {
                    row.remove(i);
                }
                row
            })
            .collect();
        Ok(Table { column_names, rows })
    }
}
