//! Main data structure used to answer prefix queries

use std::collections::HashMap;
use std::sync::OnceLock;

use log::debug;

use crate::base::{truncate_chars, Len, Term, TermIndex, Weight};
use crate::builder::{build_index, IndexOptions};
use crate::error::Result;

/// Generic trait for completers
pub trait Autocompletor: Send + Sync {
    /// Returns the `k` heaviest terms starting with `prefix`, heaviest first.
    ///
    /// Fewer than `k` terms are returned when there are not enough
    /// matches, and an empty vector when nothing matches.
    fn top_matches(&self, prefix: &str, k: usize) -> Vec<Term>;

    /// Approximate number of bytes used by the completer
    fn size_in_bytes(&self) -> usize;

    /// Returns the heaviest term starting with `prefix`
    fn top_match(&self, prefix: &str) -> Option<Term> {
        self.top_matches(prefix, 1).into_iter().next()
    }
}

/// Maps every prefix (up to a maximum length) to the terms it starts,
/// sorted by decreasing weight
pub struct PrefixIndex {
    /// The corpus, in insertion order
    terms: Vec<Term>,

    /// Prefix to positions in `terms`
    buckets: HashMap<String, Vec<TermIndex>>,

    options: IndexOptions,

    /// Cached by `size_in_bytes`
    size: OnceLock<usize>,
}

impl PrefixIndex {
    /// Builds an index with the default options
    pub fn new<S: AsRef<str>>(terms: &[S], weights: &[Weight]) -> Result<Self> {
        Self::with_options(terms, weights, &IndexOptions::default())
    }

    pub fn with_options<S: AsRef<str>>(
        terms: &[S],
        weights: &[Weight],
        options: &IndexOptions,
    ) -> Result<Self> {
        build_index(Some(terms), Some(weights), options)
    }

    /// Builds an index from columns that might be missing (e.g. when
    /// loaded from a file); a missing column is an invalid argument
    pub fn from_columns<S: AsRef<str>>(
        terms: Option<&[S]>,
        weights: Option<&[Weight]>,
        options: &IndexOptions,
    ) -> Result<Self> {
        build_index(terms, weights, options)
    }

    pub(crate) fn from_parts(
        terms: Vec<Term>,
        buckets: HashMap<String, Vec<TermIndex>>,
        options: IndexOptions,
    ) -> Self {
        Self {
            terms,
            buckets,
            options,
            size: OnceLock::new(),
        }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Number of distinct prefixes
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterates over the stored prefixes (in no particular order)
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.keys().map(|k| k.as_str())
    }

    fn bucket(&self, prefix: &str) -> Option<&Vec<TermIndex>> {
        let key = truncate_chars(prefix, self.options.max_prefix_length);
        if key.len() < prefix.len() {
            debug!("Prefix {} truncated to {}", prefix, key);
        }
        self.buckets.get(key)
    }

    /// All the terms matching `prefix`, heaviest first (the prefix is
    /// truncated as for `top_matches`)
    pub fn matches<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a Term> + 'a {
        self.bucket(prefix)
            .into_iter()
            .flat_map(move |bucket| bucket.iter().map(move |ix| &self.terms[*ix]))
    }

    fn compute_size(&self) -> usize {
        let IndexOptions {
            bytes_per_char,
            bytes_per_weight,
            ..
        } = self.options;

        self.buckets
            .iter()
            .map(|(key, bucket)| {
                let words: usize = bucket
                    .iter()
                    .map(|ix| bytes_per_char * self.terms[*ix].word.chars().count())
                    .sum();
                bytes_per_char * key.chars().count() + words + bytes_per_weight * bucket.len()
            })
            .sum()
    }
}

impl Len for PrefixIndex {
    fn len(&self) -> usize {
        self.terms.len()
    }
}

impl Autocompletor for PrefixIndex {
    fn top_matches(&self, prefix: &str, k: usize) -> Vec<Term> {
        match self.bucket(prefix) {
            Some(bucket) => bucket
                .iter()
                .take(k)
                .map(|ix| self.terms[*ix].clone())
                .collect(),
            None => {
                debug!("No term starts with {}", prefix);
                Vec::new()
            }
        }
    }

    fn size_in_bytes(&self) -> usize {
        *self.size.get_or_init(|| self.compute_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn words(terms: &[Term]) -> Vec<&str> {
        terms.iter().map(|t| t.word.as_str()).collect()
    }

    #[test]
    fn test_small_corpus() {
        let index = PrefixIndex::new(&["cat", "car", "dog"], &[5., 3., 10.]).unwrap();

        assert_eq!(
            index.top_matches("ca", 2),
            vec![Term::new("cat", 5.), Term::new("car", 3.)]
        );
        assert_eq!(index.top_matches("d", 5), vec![Term::new("dog", 10.)]);
        assert!(index.top_matches("z", 3).is_empty());
        assert!(index.top_matches("ca", 0).is_empty());
        assert_eq!(words(&index.top_matches("", 3)), vec!["dog", "cat", "car"]);
        assert_eq!(index.top_match("c"), Some(Term::new("cat", 5.)));
        assert_eq!(index.top_match("x"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_short_words() {
        let index = PrefixIndex::new(&["a", "abc"], &[10., 1.]).unwrap();
        assert_eq!(words(&index.top_matches("ab", 10)), vec!["abc"]);
        assert_eq!(words(&index.top_matches("a", 10)), vec!["a", "abc"]);
        assert!(index.top_matches("abcd", 10).is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let index = PrefixIndex::new(&["bb", "ba", "bc", "bd"], &[1., 2., 1., 2.]).unwrap();
        assert_eq!(
            words(&index.top_matches("b", 4)),
            vec!["ba", "bd", "bb", "bc"]
        );
    }

    #[test]
    fn test_duplicate_words() {
        let index = PrefixIndex::new(&["x", "x"], &[1., 4.]).unwrap();
        assert_eq!(
            index.top_matches("x", 5),
            vec![Term::new("x", 4.), Term::new("x", 1.)]
        );
    }

    #[test]
    fn test_truncation() {
        let options = IndexOptions {
            max_prefix_length: 3,
            ..Default::default()
        };
        let index =
            PrefixIndex::with_options(&["abcdef", "abcxyz", "ab"], &[1., 2., 3.], &options)
                .unwrap();

        // Only "abc" is looked up
        assert_eq!(words(&index.top_matches("abcdef", 5)), vec!["abcxyz", "abcdef"]);
        assert_eq!(
            index.top_matches("abcq", 5),
            index.top_matches("abc", 5)
        );
        assert!(index.prefixes().all(|p| p.chars().count() <= 3));
    }

    #[test]
    fn test_unicode_prefixes() {
        let index = PrefixIndex::new(&["été", "étude", "eté"], &[1., 2., 3.]).unwrap();
        assert_eq!(words(&index.top_matches("é", 5)), vec!["étude", "été"]);
        assert_eq!(words(&index.top_matches("ét", 5)), vec!["étude", "été"]);
        assert_eq!(words(&index.top_matches("e", 5)), vec!["eté"]);
    }

    #[test]
    fn test_matches_view() {
        let index = PrefixIndex::new(&["cat", "car", "dog"], &[5., 3., 10.]).unwrap();
        let observed: Vec<&str> = index.matches("c").map(|t| t.word.as_str()).collect();
        assert_eq!(observed, vec!["cat", "car"]);
        assert_eq!(index.matches("q").count(), 0);
    }

    #[test]
    fn test_returned_terms_are_copies() {
        let index = PrefixIndex::new(&["cat", "car"], &[5., 3.]).unwrap();
        let mut result = index.top_matches("ca", 2);
        result[0].weight = 0.;
        result.clear();
        assert_eq!(index.top_matches("ca", 1), vec![Term::new("cat", 5.)]);
    }

    #[test]
    fn test_invalid_arguments() {
        let err = PrefixIndex::new(&["a", "b"], &[1.]).err();
        assert!(matches!(err, Some(Error::InvalidArgument(_))));

        let options = IndexOptions::default();
        assert!(matches!(
            PrefixIndex::from_columns::<&str>(None, Some(&[1.][..]), &options),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            PrefixIndex::from_columns(Some(&["a"][..]), None, &options),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_corpus() {
        let index = PrefixIndex::new::<&str>(&[], &[]).unwrap();
        assert_eq!(index.bucket_count(), 0);
        assert!(index.top_matches("", 10).is_empty());
        assert_eq!(index.size_in_bytes(), 0);
    }

    #[test]
    fn test_size_in_bytes() {
        // Buckets: "" -> [ab], "a" -> [ab], "ab" -> [ab]
        // keys: 0 + 1 + 2 = 3 chars, words: 3 x 2 chars, weights: 3
        let index = PrefixIndex::new(&["ab"], &[1.]).unwrap();
        assert_eq!(index.size_in_bytes(), 2 * 3 + 2 * 6 + 8 * 3);
        // Cached value
        assert_eq!(index.size_in_bytes(), 42);

        let options = IndexOptions {
            bytes_per_char: 1,
            bytes_per_weight: 4,
            ..Default::default()
        };
        let index = PrefixIndex::with_options(&["ab"], &[1.], &options).unwrap();
        assert_eq!(index.size_in_bytes(), 3 + 6 + 12);
    }
}
