// src/error.rs
use tally_data::RecordError;
use tally_layout::LayoutError;
use tally_options::OptionsError;
use tally_render_core::RenderError;
use thiserror::Error;

/// A comprehensive error type for report rendering.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Option resolution failed: {0}")]
    Options(#[from] OptionsError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("The '{report}' report has no '{format}' formatter")]
    UnknownFormat { report: String, format: String },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Expected {expected} data, got {found}")]
    DataMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
