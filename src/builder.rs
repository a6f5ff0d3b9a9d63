//! Construction of prefix indices

use std::collections::HashMap;

use derivative::Derivative;
use log::{debug, info};

use crate::{
    base::{char_prefix_end, Term, TermIndex, Weight},
    error::{Error, Result},
    index::PrefixIndex,
};

#[derive(Derivative, Clone, Debug)]
#[derivative(Default)]
pub struct IndexOptions {
    /// Longest prefix (in characters) stored as a key; longer queries
    /// are truncated to this length
    #[derivative(Default(value = "10"))]
    pub max_prefix_length: usize,

    /// Accounting cost of one character, used by `size_in_bytes`
    #[derivative(Default(value = "2"))]
    pub bytes_per_char: usize,

    /// Accounting cost of one stored weight
    #[derivative(Default(value = "8"))]
    pub bytes_per_weight: usize,
}

/// Checks that terms and weights can be paired
pub(crate) fn check_columns<'a, S>(
    terms: Option<&'a [S]>,
    weights: Option<&'a [Weight]>,
) -> Result<(&'a [S], &'a [Weight])> {
    let (terms, weights) = match (terms, weights) {
        (Some(t), Some(w)) => (t, w),
        (None, _) => return Err(Error::InvalidArgument("terms are missing".to_string())),
        (_, None) => return Err(Error::InvalidArgument("weights are missing".to_string())),
    };

    if terms.len() != weights.len() {
        return Err(Error::InvalidArgument(format!(
            "terms and weights are not the same length ({} vs {})",
            terms.len(),
            weights.len()
        )));
    }
    Ok((terms, weights))
}

/// Accumulates terms, and produces an immutable prefix index
pub(crate) struct Indexer {
    options: IndexOptions,
    terms: Vec<Term>,
    buckets: HashMap<String, Vec<TermIndex>>,
}

impl Indexer {
    fn new(options: &IndexOptions) -> Indexer {
        Indexer {
            options: options.clone(),
            terms: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    /// Adds a term to every bucket whose key is one of its prefixes
    fn add(&mut self, word: &str, weight: Weight) {
        let term_ix = self.terms.len();

        for length in 0..=self.options.max_prefix_length {
            // Words shorter than the prefix length have no such prefix
            let end = match char_prefix_end(word, length) {
                Some(end) => end,
                None => break,
            };

            let prefix = &word[..end];
            match self.buckets.get_mut(prefix) {
                Some(bucket) => bucket.push(term_ix),
                None => {
                    self.buckets.insert(prefix.to_string(), vec![term_ix]);
                }
            }
        }

        self.terms.push(Term::new(word, weight));
    }

    /// Sorts the buckets and returns the index
    fn build(mut self) -> PrefixIndex {
        let terms = &self.terms;
        for bucket in self.buckets.values_mut() {
            // Stable: corpus order is kept among equal weights
            bucket.sort_by(|a, b| Term::by_descending_weight(&terms[*a], &terms[*b]));
        }

        info!(
            "Prefix index built ({} terms, {} prefixes)",
            self.terms.len(),
            self.buckets.len()
        );
        PrefixIndex::from_parts(self.terms, self.buckets, self.options)
    }
}

/// Builds a prefix index from parallel term and weight columns
pub fn build_index<S: AsRef<str>>(
    terms: Option<&[S]>,
    weights: Option<&[Weight]>,
    options: &IndexOptions,
) -> Result<PrefixIndex> {
    let (terms, weights) = check_columns(terms, weights)?;

    info!(
        "Building prefix index over {} terms (max. prefix length {})",
        terms.len(),
        options.max_prefix_length
    );

    let mut indexer = Indexer::new(options);
    for (word, weight) in terms.iter().zip(weights.iter()) {
        indexer.add(word.as_ref(), *weight);
    }
    debug!("Sorting {} buckets", indexer.buckets.len());

    Ok(indexer.build())
}
