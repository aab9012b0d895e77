use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("No such attribute: '{0}'")]
    NoSuchAttribute(String),
    #[error("Index {index} is out of range for a record of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Schema error: {0}")]
    Schema(String),
}
