//! A single ordered row of values with optional attribute names.
//!
//! A record is either purely positional (no attribute names) or fully named,
//! in which case every value has exactly one attribute name at the same
//! position. Names are kept unique and resolved through a name -> position
//! index that is rebuilt after every schema change.

use crate::error::RecordError;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::ops::Index;
use tally_types::{Key, Value};

#[derive(Debug, Clone, Default)]
pub struct Record {
    attributes: Vec<String>,
    data: Vec<Value>,
    positions: HashMap<String, usize>,
}

fn unique_names<A, S>(names: A) -> Result<Vec<String>, RecordError>
where
    A: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(RecordError::InvalidArgument(format!(
                "duplicate attribute name '{}'",
                name
            )));
        }
    }
    Ok(names)
}

impl Record {
    /// Creates a purely positional record.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            attributes: Vec::new(),
            data: values.into_iter().map(Into::into).collect(),
            positions: HashMap::new(),
        }
    }

    /// Creates a named record. Values are aligned to the attribute list:
    /// surplus values are dropped and missing ones become `Value::Null`.
    /// An empty attribute list yields a positional record.
    pub fn with_attributes<I, V, A, S>(values: I, attributes: A) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = unique_names(attributes)?;
        if attributes.is_empty() {
            return Ok(Self::new(values));
        }
        let mut values = values.into_iter().map(Into::into);
        let data = attributes
            .iter()
            .map(|_| values.next().unwrap_or_default())
            .collect();
        Ok(Self::from_parts(attributes, data))
    }

    /// Creates a named record whose attribute order follows the iteration
    /// order of `pairs`. A repeated key keeps its first position and its
    /// last value.
    pub fn from_map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let map: IndexMap<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let (attributes, data) = map.into_iter().unzip();
        Self::from_parts(attributes, data)
    }

    /// Creates a named record with an explicit attribute order. Values are
    /// taken from `pairs` by name; keys that are not listed are dropped.
    pub fn from_map_with_attributes<I, K, V, A, S>(
        pairs: I,
        attributes: A,
    ) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map: IndexMap<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let attributes = unique_names(attributes)?;
        let data = attributes
            .iter()
            .map(|name| map.swap_remove(name).unwrap_or_default())
            .collect();
        Ok(Self::from_parts(attributes, data))
    }

    fn from_parts(attributes: Vec<String>, data: Vec<Value>) -> Self {
        let mut record = Self {
            attributes,
            data,
            positions: HashMap::new(),
        };
        record.reindex();
        record
    }

    fn reindex(&mut self) {
        self.positions = self
            .attributes
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.data.iter()
    }

    /// Position of the named attribute, if any.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    fn resolve(&self, key: &Key) -> Result<Option<usize>, RecordError> {
        match key {
            Key::Index(i) if *i < self.data.len() => Ok(Some(*i)),
            Key::Index(i) => Err(RecordError::OutOfRange {
                index: *i,
                len: self.data.len(),
            }),
            Key::Name(name) => Ok(self.position(name)),
        }
    }

    /// Dictionary-style read. An unknown position is an error, an unknown
    /// name is simply absent.
    pub fn get<K: Into<Key>>(&self, key: K) -> Result<Option<&Value>, RecordError> {
        let key = key.into();
        Ok(self.resolve(&key)?.map(|i| &self.data[i]))
    }

    pub fn get_mut<K: Into<Key>>(&mut self, key: K) -> Result<Option<&mut Value>, RecordError> {
        let key = key.into();
        match self.resolve(&key)? {
            Some(i) => Ok(self.data.get_mut(i)),
            None => Ok(None),
        }
    }

    /// Dictionary-style write. Writing an unknown name appends a new
    /// trailing attribute.
    pub fn set<K: Into<Key>, V: Into<Value>>(&mut self, key: K, value: V) -> Result<(), RecordError> {
        let value = value.into();
        match key.into() {
            Key::Index(i) => {
                let len = self.data.len();
                let slot = self
                    .data
                    .get_mut(i)
                    .ok_or(RecordError::OutOfRange { index: i, len })?;
                *slot = value;
            }
            Key::Name(name) => match self.position(&name) {
                Some(i) => self.data[i] = value,
                None => self.append(name, value)?,
            },
        }
        Ok(())
    }

    fn append(&mut self, name: String, value: Value) -> Result<(), RecordError> {
        if self.attributes.is_empty() && !self.data.is_empty() {
            return Err(RecordError::Schema(format!(
                "cannot add attribute '{}' to a record without attribute names",
                name
            )));
        }
        self.positions.insert(name.clone(), self.attributes.len());
        self.attributes.push(name);
        self.data.push(value);
        Ok(())
    }

    /// Attribute-style read: fails on names the record does not declare.
    pub fn attr(&self, name: &str) -> Result<&Value, RecordError> {
        self.position(name)
            .map(|i| &self.data[i])
            .ok_or_else(|| RecordError::NoSuchAttribute(name.to_string()))
    }

    /// Attribute-style write: fails on names the record does not declare.
    pub fn set_attr<V: Into<Value>>(&mut self, name: &str, value: V) -> Result<(), RecordError> {
        let i = self
            .position(name)
            .ok_or_else(|| RecordError::NoSuchAttribute(name.to_string()))?;
        self.data[i] = value.into();
        Ok(())
    }

    pub fn rename_attribute(&mut self, old: &str, new: impl Into<String>) -> Result<(), RecordError> {
        let new = new.into();
        let i = self
            .position(old)
            .ok_or_else(|| RecordError::NoSuchAttribute(old.to_string()))?;
        if old == new {
            return Ok(());
        }
        if self.positions.contains_key(&new) {
            return Err(RecordError::InvalidArgument(format!(
                "attribute '{}' already exists",
                new
            )));
        }
        self.positions.remove(old);
        self.positions.insert(new.clone(), i);
        self.attributes[i] = new;
        Ok(())
    }

    /// Replaces every attribute name at once.
    ///
    /// An empty record takes `Null` values for the new names; otherwise the
    /// number of names must match the number of values.
    pub fn set_attributes<A, S>(&mut self, attributes: A) -> Result<(), RecordError>
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = unique_names(attributes)?;
        if self.data.is_empty() {
            self.data = vec![Value::Null; attributes.len()];
        } else if !attributes.is_empty() && attributes.len() != self.data.len() {
            return Err(RecordError::InvalidArgument(format!(
                "expected {} attribute names, got {}",
                self.data.len(),
                attributes.len()
            )));
        }
        self.attributes = attributes;
        self.reindex();
        Ok(())
    }

    /// Keeps only the listed cells, in the listed order.
    ///
    /// Keys may be names or positions. The whole key list is validated
    /// before anything changes, so a rejected reorder leaves the record
    /// untouched.
    pub fn reorder<I, K>(&mut self, keys: I) -> Result<&mut Self, RecordError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(RecordError::InvalidArgument(
                "reorder requires at least one key".to_string(),
            ));
        }

        let mut positions = Vec::with_capacity(keys.len());
        let mut seen = HashSet::with_capacity(keys.len());
        for key in &keys {
            let pos = match key {
                Key::Index(i) if *i < self.data.len() => *i,
                Key::Index(i) => {
                    return Err(RecordError::InvalidArgument(format!(
                        "index {} is out of range for a record of length {}",
                        i,
                        self.data.len()
                    )));
                }
                Key::Name(name) => self.position(name).ok_or_else(|| {
                    RecordError::InvalidArgument(format!("unknown attribute '{}'", name))
                })?,
            };
            if !seen.insert(pos) {
                return Err(RecordError::InvalidArgument(format!(
                    "'{}' is listed more than once",
                    key
                )));
            }
            positions.push(pos);
        }

        self.data = positions.iter().map(|&p| self.data[p].clone()).collect();
        if !self.attributes.is_empty() {
            self.attributes = positions
                .iter()
                .map(|&p| self.attributes[p].clone())
                .collect();
        }
        self.reindex();
        Ok(self)
    }

    /// Removes a named attribute and its value.
    pub fn delete(&mut self, name: &str) -> Option<Value> {
        let i = self.position(name)?;
        self.attributes.remove(i);
        let value = self.data.remove(i);
        self.reindex();
        Some(value)
    }

    /// A detached copy of the values.
    pub fn to_vec(&self) -> Vec<Value> {
        self.data.clone()
    }

    /// Name -> value pairs in attribute order. Positional records use their
    /// positions as names.
    pub fn to_map(&self) -> IndexMap<String, Value> {
        if self.attributes.is_empty() {
            self.data
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect()
        } else {
            self.attributes
                .iter()
                .cloned()
                .zip(self.data.iter().cloned())
                .collect()
        }
    }

    pub fn into_data(self) -> Vec<Value> {
        self.data
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes && self.data == other.data
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attributes.hash(state);
        self.data.hash(state);
    }
}

impl Index<usize> for Record {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.data[index]
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if no attribute has this name. Use [`Record::get`] or
    /// [`Record::attr`] to handle a missing name.
    fn index(&self, name: &str) -> &Value {
        match self.position(name) {
            Some(i) => &self.data[i],
            None => panic!("no such attribute: '{}'", name),
        }
    }
}

impl AsRef<Record> for Record {
    fn as_ref(&self) -> &Record {
        self
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
