//! List-mode option-arguments: one argument split into several typed items.
//!
//! `--tags a,b,c` with delimiters `","` yields three items. There is no escape
//! syntax, and empty items between adjacent delimiters are kept, so `"a,,b"`
//! has three items and the empty text has one.

use crate::convert::convert;
use crate::error::ParseErrorKind;
use crate::value::{Value, ValueType};

/// Allowed number of items in a list-mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLen {
    pub min: usize,
    pub max: Option<usize>,
}

impl Default for ListLen {
    fn default() -> Self {
        ListLen { min: 0, max: None }
    }
}

impl ListLen {
    pub fn new(min: usize, max: Option<usize>) -> Self {
        ListLen { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

/// Splits `text` on every character contained in `delimiters`.
pub fn split<'a>(text: &'a str, delimiters: &str) -> Vec<&'a str> {
    text.split(|c: char| delimiters.contains(c)).collect()
}

/// Splits `text`, checks the item count against `len`, then converts every item.
///
/// The count is checked before any item is converted, so a list that is both
/// too long and malformed reports the length problem.
pub fn split_convert(
    text: &str,
    delimiters: &str,
    ty: ValueType,
    len: ListLen,
) -> Result<Vec<Value>, ParseErrorKind> {
    let items = split(text, delimiters);
    if !len.contains(items.len()) {
        return Err(ParseErrorKind::ListLength {
            count: items.len(),
            min: len.min,
            max: len.max,
        });
    }
    items
        .into_iter()
        .map(|item| convert(item, ty).map_err(ParseErrorKind::from))
        .collect()
}
