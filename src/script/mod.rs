//! Script text <-> pipeline model.

pub mod parse;
pub mod serialize;

pub use parse::{DiscardRows, RowSkipSink, parse, parse_with};
pub use serialize::serialize;
