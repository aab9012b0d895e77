//! Case-insensitive keyword parsing shared by the style enums.

use thiserror::Error;

/// Errors that can occur while parsing a style keyword.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    #[error("Unknown page size: {0}")]
    PageSize(String),

    #[error("Unknown page orientation: {0}")]
    Orientation(String),

    #[error("Unknown justification: {0}")]
    Justification(String),

    #[error("Unknown grouping style: {0}")]
    GroupingStyle(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

/// Normalizes a keyword for comparison: trims whitespace, lowercases, and
/// accepts a leading `:` so that `":landscape"` and `"landscape"` match.
pub(crate) fn keyword(input: &str) -> String {
    input.trim().trim_start_matches(':').to_lowercase()
}

/// Parse a length with an optional unit suffix (`pt`, `px`, `in`, `cm`, `mm`).
pub fn parse_length(input: &str) -> Result<f32, StyleParseError> {
    let input = input.trim();
    let invalid = || StyleParseError::InvalidValue {
        property: "length".to_string(),
        value: input.to_string(),
    };
    let (number, factor) = if let Some(v) = input.strip_suffix("pt") {
        (v, 1.0)
    } else if let Some(v) = input.strip_suffix("px") {
        (v, 1.0)
    } else if let Some(v) = input.strip_suffix("in") {
        (v, 72.0)
    } else if let Some(v) = input.strip_suffix("cm") {
        (v, 28.35)
    } else if let Some(v) = input.strip_suffix("mm") {
        (v, 2.835)
    } else {
        (input, 1.0)
    };
    number.trim().parse::<f32>().map(|v| v * factor).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length() {
        assert_eq!(parse_length("12pt").unwrap(), 12.0);
        assert_eq!(parse_length(" 1in ").unwrap(), 72.0);
        assert_eq!(parse_length("10").unwrap(), 10.0);
        assert!(parse_length("abc").is_err());
    }

    #[test]
    fn test_keyword_normalization() {
        assert_eq!(keyword(" :Landscape "), "landscape");
        assert_eq!(keyword("LETTER"), "letter");
    }
}
