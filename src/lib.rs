//! # tally
//!
//! Tabular reporting: records, tables and groupings rendered as plain text,
//! CSV or PDF.
//!
//! - **controller**: report kinds and the stage loop driving a formatter
//! - **formatter**: the text, CSV and PDF formatters
//! - **reports**: the built-in `row`, `table`, `group` and `grouping` kinds
//! - **renderable**: `to_text` / `to_csv` / `to_pdf` on the data types
//!
//! ```no_run
//! use tally::{Record, RenderOptions, Renderable};
//!
//! let record = Record::new([1, 2, 3]);
//! let csv = record.to_csv(&RenderOptions::new().col_sep("\t"))?;
//! # Ok::<(), tally::ReportError>(())
//! ```

// Re-export foundation crates
pub use tally_data as data;
pub use tally_style as style;
pub use tally_types as types;

// Re-export option resolution, layout and render crates
pub use tally_layout as layout;
pub use tally_options as options;
pub use tally_render_core as render_core;
pub use tally_render_lopdf as render_lopdf;

pub mod controller;
pub mod error;
pub mod formatter;
pub mod renderable;
pub mod reports;

// Re-export commonly used types from member crates
pub use data::{Group, Grouping, Key, Record, RecordError, Table, Value};
pub use layout::{LayoutConfig, LayoutEngine, TextPosition};
pub use options::{EffectiveOptions, OptionsError, RenderOptions, Template, TemplateRegistry};
pub use style::{GroupingStyle, Justification, Orientation, PageSize};

// Re-export from internal modules
pub use controller::{Controller, FormatterFactory, RenderContext, ReportData};
pub use error::ReportError;
pub use formatter::{Builds, CsvFormatter, Formatter, PdfFormatter, StageHandler, TextFormatter};
pub use renderable::Renderable;
