//! Rendering straight from the data types.

use crate::controller::{RenderContext, ReportData};
use crate::error::ReportError;
use tally_data::{Group, Grouping, Record, Table};
use tally_options::RenderOptions;

/// Data that renders through its built-in report kind.
///
/// Types wrapping a [`Record`] get the row report by implementing
/// `report_data` as `ReportData::row(self)`.
pub trait Renderable {
    fn report_data(&self) -> ReportData<'_>;

    /// Renders as output kind `format` (`"text"`, `"csv"`, `"pdf"`).
    fn render_as(&self, format: &str, options: &RenderOptions) -> Result<Vec<u8>, ReportError> {
        let data = self.report_data();
        data.controller().render(format, data, options)
    }

    /// Like [`render_as`](Self::render_as), handing the render context to
    /// `inspect` before the first stage runs.
    fn render_with<H>(&self, format: &str, options: &RenderOptions, inspect: H) -> Result<Vec<u8>, ReportError>
    where
        H: FnOnce(&mut RenderContext<'_>),
    {
        let data = self.report_data();
        data.controller().render_with(format, data, options, inspect)
    }

    fn to_text(&self, options: &RenderOptions) -> Result<String, ReportError> {
        Ok(String::from_utf8(self.render_as("text", options)?)?)
    }

    fn to_csv(&self, options: &RenderOptions) -> Result<String, ReportError> {
        Ok(String::from_utf8(self.render_as("csv", options)?)?)
    }

    fn to_pdf(&self, options: &RenderOptions) -> Result<Vec<u8>, ReportError> {
        self.render_as("pdf", options)
    }
}

impl Renderable for Record {
    fn report_data(&self) -> ReportData<'_> {
        ReportData::Row(self)
    }
}

impl Renderable for Table {
    fn report_data(&self) -> ReportData<'_> {
        ReportData::Table(self)
    }
}

impl Renderable for Group {
    fn report_data(&self) -> ReportData<'_> {
        ReportData::Group(self)
    }
}

impl Renderable for Grouping {
    fn report_data(&self) -> ReportData<'_> {
        ReportData::Grouping(self)
    }
}
