//! Core drawing abstractions for Tally's page-oriented output.
//!
//! This crate provides:
//! - the `PageBackend` trait that page layout draws through
//! - `TablePlan`, the table geometry shared by every backend
//! - `MemoryBackend`, which records draw calls for inspection
//! - error types for rendering operations

mod error;
pub mod memory;
pub mod table;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use memory::{DrawOp, MemoryBackend};
pub use table::{PlacedText, TablePlan};
pub use traits::{PageBackend, TextStyle};
