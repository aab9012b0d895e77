//! Page layout for Tally's PDF output.
//!
//! [`LayoutEngine`] tracks a vertical cursor against the page margins of a
//! [`PageBackend`](tally_render_core::PageBackend). Padding and drawing are
//! scoped: padding is applied around a block, and drawing at an absolute
//! position leaves the cursor where it was.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Backend error: {0}")]
    Backend(#[from] tally_render_core::RenderError),
}

pub mod config;
pub mod engine;
mod guard;

pub use self::config::LayoutConfig;
pub use self::engine::{LayoutEngine, TextPosition};
