use crate::parsers::{keyword, StyleParseError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How a grouping lays out its group names relative to the group tables.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// Group name on its own line above each table.
    #[default]
    Inline,
    /// Group name in the left margin beside the table.
    Justified,
    /// Extra vertical space between groups.
    Separated,
    /// Table indented below the group name.
    Offset,
}

impl FromStr for GroupingStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match keyword(s).as_str() {
            "inline" => Ok(GroupingStyle::Inline),
            "justified" => Ok(GroupingStyle::Justified),
            "separated" => Ok(GroupingStyle::Separated),
            "offset" => Ok(GroupingStyle::Offset),
            _ => Err(StyleParseError::GroupingStyle(s.to_string())),
        }
    }
}

impl fmt::Display for GroupingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupingStyle::Inline => "inline",
            GroupingStyle::Justified => "justified",
            GroupingStyle::Separated => "separated",
            GroupingStyle::Offset => "offset",
        };
        f.write_str(name)
    }
}
