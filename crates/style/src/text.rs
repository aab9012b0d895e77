use crate::parsers::{keyword, StyleParseError};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Horizontal placement of text within a line or a table cell.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    #[default]
    Left,
    Right,
    Center,
    Full,
}

impl Justification {
    /// Offset of a run of `content_width` inside a box of `box_width`.
    pub fn offset(self, content_width: f32, box_width: f32) -> f32 {
        let slack = (box_width - content_width).max(0.0);
        match self {
            Justification::Left | Justification::Full => 0.0,
            Justification::Right => slack,
            Justification::Center => slack / 2.0,
        }
    }
}

impl FromStr for Justification {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "left" => Ok(Justification::Left),
            "right" => Ok(Justification::Right),
            "center" | "centre" => Ok(Justification::Center),
            "full" | "justify" => Ok(Justification::Full),
            _ => Err(StyleParseError::Justification(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Justification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(Justification::Left.offset(10.0, 50.0), 0.0);
        assert_eq!(Justification::Right.offset(10.0, 50.0), 40.0);
        assert_eq!(Justification::Center.offset(10.0, 50.0), 20.0);
        assert_eq!(Justification::Center.offset(80.0, 50.0), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(":center".parse::<Justification>().unwrap(), Justification::Center);
        assert!("middle".parse::<Justification>().is_err());
    }
}
