//! Lookup keys for record cells.
//!
//! A cell can be addressed by position or by attribute name. Every textual
//! representation of a name (`&str`, `String`, `Cow<str>`, ...) converts into
//! the same canonical `Key::Name`, so callers never need to care which one
//! they hold.

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl Key {
    /// Returns the attribute name if this key addresses a cell by name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Name(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Name(s.clone())
    }
}

impl From<Cow<'_, str>> for Key {
    fn from(s: Cow<'_, str>) -> Self {
        Key::Name(s.into_owned())
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Index(i) => write!(f, "{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textual_keys_are_indifferent() {
        let owned = String::from("b");
        let k1 = Key::from("b");
        let k2 = Key::from(owned.clone());
        let k3 = Key::from(&owned);
        let k4 = Key::from(Cow::Borrowed("b"));

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k3, k4);
        assert_eq!(k1.as_name(), Some("b"));
        assert_eq!(k1.as_index(), None);
    }

    #[test]
    fn test_index_key() {
        let key = Key::from(3usize);
        assert_eq!(key.as_index(), Some(3));
        assert_eq!(key.to_string(), "3");
    }
}
