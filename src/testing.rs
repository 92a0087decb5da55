//! Testing helpers.

use crate::document::Document;

/// A write-up that reports every probability theory answer correctly.
pub const WRITE_UP: &str = include_str!("../data/homework.tex");

pub fn write_up() -> Document {
    Document::from_text(WRITE_UP)
}

/// The write-up with every occurrence of `from` replaced by `to`.
pub fn write_up_with(from: &str, to: &str) -> Document {
    assert!(WRITE_UP.contains(from), "write-up does not contain {from:?}");
    Document::from_text(WRITE_UP.replace(from, to))
}
