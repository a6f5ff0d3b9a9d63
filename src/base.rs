use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a term within the corpus
pub type TermIndex = usize;
pub type Weight = f64;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;
}

/// A corpus entry: a word and its weight
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Term {
    pub word: String,
    pub weight: Weight,
}

impl Term {
    pub fn new(word: impl Into<String>, weight: Weight) -> Self {
        Self {
            word: word.into(),
            weight,
        }
    }

    /// Orders terms so that the heaviest comes first; NaN is heavier
    /// than +inf
    pub fn by_descending_weight(a: &Term, b: &Term) -> Ordering {
        b.weight.total_cmp(&a.weight)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.word, self.weight)
    }
}

/// Byte offset of the end of the first `n` characters of `s`, or `None` if
/// `s` has fewer than `n` characters
pub(crate) fn char_prefix_end(s: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return Some(0);
    }
    s.char_indices()
        .nth(n - 1)
        .map(|(pos, c)| pos + c.len_utf8())
}

/// Returns at most the first `n` characters of `s`
pub(crate) fn truncate_chars(s: &str, n: usize) -> &str {
    match char_prefix_end(s, n) {
        Some(end) => &s[..end],
        None => s,
    }
}
