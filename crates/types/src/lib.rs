pub mod key;
pub mod value;

pub use key::Key;
pub use value::Value;
