//! Layering templates, category overrides and keyword overrides into the
//! options one render actually uses.

use crate::error::OptionsError;
use crate::format::{
    ColumnFormat, ColumnOptions, DelimitedOptions, GroupingFormat, HeadingFormat, HeadingOptions,
    PageFormat, TableFormat, TextFormat,
};
use crate::request::RenderOptions;
use crate::template::{Template, TemplateRegistry};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use tally_style::{GroupingStyle, Margins, Orientation, PageSize, StyleParseError};

/// The resolved option tree for a single render call.
///
/// It owns all of its data; nothing in it aliases the template or the
/// caller's request.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct EffectiveOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<PageSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_margins: Option<Margins>,
    pub text_format: TextFormat,
    pub table_format: TableFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_table_headers: Option<bool>,
    pub format_options: DelimitedOptions,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// The six categories of one layer, before they are mapped onto the
/// effective shape.
struct Categories<'a> {
    page: &'a PageFormat,
    text: &'a TextFormat,
    table: &'a TableFormat,
    column: &'a ColumnFormat,
    heading: &'a HeadingFormat,
    grouping: &'a GroupingFormat,
}

impl Categories<'_> {
    fn to_effective(&self) -> EffectiveOptions {
        let derived = ColumnOptions {
            justification: self.column.alignment,
            width: self.column.width,
            heading: HeadingOptions {
                justification: self.heading.alignment,
                bold: self.heading.bold,
                title: self.heading.title.clone(),
            },
            ..Default::default()
        };
        // Direct column_options beat the column/heading categories.
        let table_format = TableFormat {
            column_options: derived.merged(&self.table.column_options),
            ..self.table.clone()
        };
        EffectiveOptions {
            paper_size: self.page.size,
            paper_orientation: self.page.layout,
            paper_margins: self.page.margins,
            text_format: self.text.clone(),
            table_format,
            style: self.grouping.style.clone(),
            ..Default::default()
        }
    }
}

impl From<&Template> for EffectiveOptions {
    fn from(template: &Template) -> Self {
        let mut effective = Categories {
            page: &template.page,
            text: &template.text,
            table: &template.table,
            column: &template.column,
            heading: &template.heading,
            grouping: &template.grouping,
        }
        .to_effective();
        effective.template = Some(template.name().to_string());
        effective
    }
}

impl EffectiveOptions {
    /// Resolves `request` against the global template registry.
    pub fn resolve(request: &RenderOptions) -> Result<Self, OptionsError> {
        Self::resolve_with(TemplateRegistry::global(), request)
    }

    /// Resolves `request` against `registry`.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::UnknownTemplate` if the request names a
    /// template the registry does not hold.
    pub fn resolve_with(registry: &TemplateRegistry, request: &RenderOptions) -> Result<Self, OptionsError> {
        let base = match &request.template {
            Some(name) => {
                let template = registry
                    .get(name)?
                    .ok_or_else(|| OptionsError::UnknownTemplate(name.clone()))?;
                log::debug!("Resolving render options from template '{}'", name);
                EffectiveOptions::from(template.as_ref())
            }
            None => EffectiveOptions::default(),
        };

        let page = request.page_format.clone().unwrap_or_default();
        let text = request.text_format.clone().unwrap_or_default();
        let table = request.table_format.clone().unwrap_or_default();
        let column = request.column_format.clone().unwrap_or_default();
        let heading = request.heading_format.clone().unwrap_or_default();
        let grouping = request.grouping_format.clone().unwrap_or_default();
        let caller = Categories {
            page: &page,
            text: &text,
            table: &table,
            column: &column,
            heading: &heading,
            grouping: &grouping,
        }
        .to_effective();

        let keywords = EffectiveOptions {
            paper_size: request.paper_size,
            paper_orientation: request.paper_orientation,
            style: request.style.clone(),
            show_table_headers: request.show_table_headers,
            table_format: TableFormat {
                show_headings: request.show_table_headers,
                ..Default::default()
            },
            format_options: request.format_options.clone().unwrap_or_default(),
            extra: request.extra.clone(),
            ..Default::default()
        };

        Ok(base.merged(&caller).merged(&keywords))
    }

    /// Deep merge; every field set in `over` wins.
    pub fn merged(&self, over: &Self) -> Self {
        let mut extra = self.extra.clone();
        for (key, value) in &over.extra {
            extra.insert(key.clone(), value.clone());
        }
        Self {
            template: over.template.clone().or_else(|| self.template.clone()),
            paper_size: over.paper_size.or(self.paper_size),
            paper_orientation: over.paper_orientation.or(self.paper_orientation),
            paper_margins: over.paper_margins.or(self.paper_margins),
            text_format: self.text_format.merged(&over.text_format),
            table_format: self.table_format.merged(&over.table_format),
            style: over.style.clone().or_else(|| self.style.clone()),
            show_table_headers: over.show_table_headers.or(self.show_table_headers),
            format_options: self.format_options.merged(&over.format_options),
            extra,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.paper_size.unwrap_or_default()
    }

    pub fn orientation(&self) -> Orientation {
        self.paper_orientation.unwrap_or_default()
    }

    /// The grouping style, `inline` when none is set.
    pub fn grouping_style(&self) -> Result<GroupingStyle, StyleParseError> {
        match &self.style {
            Some(style) => style.parse(),
            None => Ok(GroupingStyle::default()),
        }
    }

    /// Whether table headings are shown; the `show_table_headers` keyword
    /// wins over `table_format.show_headings`.
    pub fn shows_table_headers(&self) -> bool {
        self.show_table_headers
            .or(self.table_format.show_headings)
            .unwrap_or(true)
    }
}
