//! Partitioning a table by the distinct values of one column.

use crate::error::RecordError;
use crate::table::Table;
use indexmap::IndexMap;

/// A named slice of a table. The grouping column is not repeated in the
/// group's own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub table: Table,
}

impl Group {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    grouped_by: String,
    groups: IndexMap<String, Group>,
}

impl Grouping {
    /// Groups `table` by column `by`. Group order and row order follow
    /// first appearance in the source table.
    pub fn new(table: &Table, by: &str) -> Result<Self, RecordError> {
        let by_index = table
            .column_index(by)
            .ok_or_else(|| RecordError::NoSuchAttribute(by.to_string()))?;
        let columns: Vec<String> = table
            .column_names()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != by_index)
            .map(|(_, name)| name.clone())
            .collect();

        let mut groups: IndexMap<String, Group> = IndexMap::new();
        for row in table.rows() {
            let key = row.get(by_index).map(ToString::to_string).unwrap_or_default();
            let rest: Vec<_> = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != by_index)
                .map(|(_, v)| v.clone())
                .collect();
            groups
                .entry(key.clone())
                .or_insert_with(|| Group::new(key, Table::new(columns.iter().cloned())))
                .table
                .push(rest)?;
        }
        log::debug!("Grouped {} rows by '{}' into {} groups", table.len(), by, groups.len());

        Ok(Self {
            grouped_by: by.to_string(),
            groups,
        })
    }

    pub fn grouped_by(&self) -> &str {
        &self.grouped_by
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
