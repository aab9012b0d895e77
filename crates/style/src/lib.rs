pub mod dimension;
pub mod font;
pub mod grouping;
pub mod parsers;
pub mod text;

pub use dimension::{Margins, Orientation, PageSize};
pub use font::FontWeight;
pub use grouping::GroupingStyle;
pub use parsers::StyleParseError;
pub use text::Justification;
