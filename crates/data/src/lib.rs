//! Row-oriented report data.
//!
//! - [`Record`]: one ordered row, addressable by position or attribute name
//! - [`Table`]: rows sharing one column schema
//! - [`Grouping`]: a table partitioned by the distinct values of one column

mod error;
pub mod grouping;
pub mod record;
pub mod table;

pub use error::RecordError;
pub use grouping::{Group, Grouping};
pub use record::Record;
pub use table::Table;

pub use tally_types::{Key, Value};
