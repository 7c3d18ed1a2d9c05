//! `#` header lines.
//!
//! The logical header spans several physical lines; each is kept as its own
//! record and the sub-classification (signal, out-of-memory, bug URL, ...)
//! is computed from the raw text on demand. See [`HeaderLine`].

use crate::model::HeaderLine;

pub fn parse_header(line: &str) -> HeaderLine {
    HeaderLine { raw: line.to_string() }
}
