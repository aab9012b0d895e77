//! PDF output for Tally reports using lopdf.
//!
//! The document object graph is built in memory and serialized when the
//! backend is finished.

mod renderer;

pub use renderer::LopdfBackend;
