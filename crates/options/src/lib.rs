//! Render option resolution.
//!
//! Options reach a formatter through three layers, each one overriding the
//! previous key by key:
//!
//! 1. a named [`Template`] from the [`TemplateRegistry`]
//! 2. the caller's category blocks (`page_format`, `table_format`, ...)
//! 3. the caller's keyword overrides (`paper_size`, `paper_orientation`, `style`)
//!
//! [`EffectiveOptions::resolve`] performs the layering and returns a fresh
//! tree; neither the template nor the [`RenderOptions`] it reads is touched.

mod error;
pub mod format;
pub mod request;
pub mod resolve;
pub mod template;

pub use error::OptionsError;
pub use format::{
    ColumnFormat, ColumnOptions, DelimitedOptions, GroupingFormat, HeadingFormat, HeadingOptions,
    PageFormat, TableFormat, TextFormat,
};
pub use request::RenderOptions;
pub use resolve::EffectiveOptions;
pub use template::{Template, TemplateRegistry};
