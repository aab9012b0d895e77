//! Per-category format blocks.
//!
//! Every field is optional so a block only states what it overrides. Merging
//! is key by key: `base.merged(&over)` takes each field from `over` when it
//! is set and from `base` otherwise, and always returns a fresh value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tally_style::{Justification, Margins, Orientation, PageSize};

fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
    over.clone().or_else(|| base.clone())
}

fn merge_extra(base: &Map<String, JsonValue>, over: &Map<String, JsonValue>) -> Map<String, JsonValue> {
    let mut merged = base.clone();
    for (key, value) in over {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// The `page` category.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PageFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Orientation>,
    /// A number, a shorthand string such as `"36pt 18pt"`, or a map of sides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

impl PageFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            size: pick(&self.size, &over.size),
            layout: pick(&self.layout, &over.layout),
            margins: pick(&self.margins, &over.margins),
        }
    }
}

/// The `text` category. Unknown keys are carried in `extra`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TextFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Justification>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl TextFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            font_size: pick(&self.font_size, &over.font_size),
            font: pick(&self.font, &over.font),
            justification: pick(&self.justification, &over.justification),
            extra: merge_extra(&self.extra, &over.extra),
        }
    }
}

/// Settings applied to every column heading of a drawn table.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HeadingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Justification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl HeadingOptions {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            justification: pick(&self.justification, &over.justification),
            bold: pick(&self.bold, &over.bold),
            title: pick(&self.title, &over.title),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.justification.is_none() && self.bold.is_none() && self.title.is_none()
    }
}

/// Settings applied to the columns of a drawn table.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ColumnOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Justification>,
    /// Width of every column, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Per-column widths keyed by column name; these beat `width`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub widths: BTreeMap<String, f32>,
    #[serde(skip_serializing_if = "HeadingOptions::is_empty")]
    pub heading: HeadingOptions,
}

impl ColumnOptions {
    pub fn merged(&self, over: &Self) -> Self {
        let mut widths = self.widths.clone();
        widths.extend(over.widths.iter().map(|(k, v)| (k.clone(), *v)));
        Self {
            justification: pick(&self.justification, &over.justification),
            width: pick(&self.width, &over.width),
            widths,
            heading: self.heading.merged(&over.heading),
        }
    }

    /// Width for the named column, if one was configured.
    pub fn width_of(&self, column: &str) -> Option<f32> {
        self.widths.get(column).copied().or(self.width)
    }
}

/// The `table` category. Unknown keys are carried in `extra`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TableFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_headings: Option<bool>,
    /// Total table width, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    pub column_options: ColumnOptions,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl TableFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            show_headings: pick(&self.show_headings, &over.show_headings),
            width: pick(&self.width, &over.width),
            font_size: pick(&self.font_size, &over.font_size),
            column_options: self.column_options.merged(&over.column_options),
            extra: merge_extra(&self.extra, &over.extra),
        }
    }

    pub fn shows_headings(&self) -> bool {
        self.show_headings.unwrap_or(true)
    }
}

/// The `column` category.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ColumnFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Justification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
}

impl ColumnFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            alignment: pick(&self.alignment, &over.alignment),
            width: pick(&self.width, &over.width),
        }
    }
}

/// The `heading` category.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HeadingFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Justification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl HeadingFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            alignment: pick(&self.alignment, &over.alignment),
            bold: pick(&self.bold, &over.bold),
            title: pick(&self.title, &over.title),
        }
    }
}

/// The `grouping` category. The style stays a string until a formatter
/// interprets it, so an unsupported style is reported by the formatter that
/// cannot draw it.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GroupingFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl GroupingFormat {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            style: pick(&self.style, &over.style),
        }
    }
}

/// Settings for delimited-text output.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DelimitedOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_sep: Option<String>,
}

impl DelimitedOptions {
    pub fn merged(&self, over: &Self) -> Self {
        Self {
            col_sep: pick(&self.col_sep, &over.col_sep),
        }
    }

    /// The field separator byte. Defaults to a comma; only the first byte of
    /// a configured separator is used.
    pub fn delimiter(&self) -> u8 {
        self.col_sep
            .as_deref()
            .and_then(|s| s.as_bytes().first().copied())
            .unwrap_or(b',')
    }
}
