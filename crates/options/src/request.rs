//! What a caller asks for when rendering.

use crate::error::OptionsError;
use crate::format::{
    ColumnFormat, DelimitedOptions, GroupingFormat, HeadingFormat, PageFormat, TableFormat,
    TextFormat,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tally_style::{Orientation, PageSize};

/// Caller-side render options: an optional template name, per-category
/// overrides, and keyword overrides that win over both.
///
/// Build it with the chained setters or deserialize it from an option tree.
/// Resolution reads it by reference and never changes it.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_format: Option<PageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_format: Option<TableFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_format: Option<ColumnFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_format: Option<HeadingFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_format: Option<GroupingFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_table_headers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_options: Option<DelimitedOptions>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(value: JsonValue) -> Result<Self, OptionsError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = Some(name.into());
        self
    }

    pub fn page_format(mut self, format: PageFormat) -> Self {
        self.page_format = Some(format);
        self
    }

    pub fn text_format(mut self, format: TextFormat) -> Self {
        self.text_format = Some(format);
        self
    }

    pub fn table_format(mut self, format: TableFormat) -> Self {
        self.table_format = Some(format);
        self
    }

    pub fn column_format(mut self, format: ColumnFormat) -> Self {
        self.column_format = Some(format);
        self
    }

    pub fn heading_format(mut self, format: HeadingFormat) -> Self {
        self.heading_format = Some(format);
        self
    }

    pub fn grouping_format(mut self, format: GroupingFormat) -> Self {
        self.grouping_format = Some(format);
        self
    }

    pub fn paper_size(mut self, size: PageSize) -> Self {
        self.paper_size = Some(size);
        self
    }

    pub fn paper_orientation(mut self, orientation: Orientation) -> Self {
        self.paper_orientation = Some(orientation);
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn show_table_headers(mut self, show: bool) -> Self {
        self.show_table_headers = Some(show);
        self
    }

    pub fn col_sep(mut self, separator: impl Into<String>) -> Self {
        self.format_options = Some(DelimitedOptions {
            col_sep: Some(separator.into()),
        });
        self
    }

    /// Sets an option no formatter knows about; it reaches
    /// `EffectiveOptions::extra` untouched.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
