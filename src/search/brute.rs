//! Linear scan over the whole corpus

use std::cmp::Ordering;

use log::debug;

use crate::{
    base::{Len, Term, Weight},
    builder::{check_columns, IndexOptions},
    error::Result,
    index::Autocompletor,
    search::TopScoredTerms,
};

/// Answers prefix queries by scanning every term. There is no prefix
/// truncation: the full prefix has to match.
pub struct BruteAutocomplete {
    terms: Vec<Term>,
    options: IndexOptions,
}

impl BruteAutocomplete {
    pub fn new<S: AsRef<str>>(terms: &[S], weights: &[Weight]) -> Result<Self> {
        Self::with_options(terms, weights, &IndexOptions::default())
    }

    /// Only the byte accounting options are used
    pub fn with_options<S: AsRef<str>>(
        terms: &[S],
        weights: &[Weight],
        options: &IndexOptions,
    ) -> Result<Self> {
        let (terms, weights) = check_columns(Some(terms), Some(weights))?;
        Ok(Self {
            terms: terms
                .iter()
                .zip(weights.iter())
                .map(|(word, weight)| Term::new(word.as_ref(), *weight))
                .collect(),
            options: options.clone(),
        })
    }
}

impl Len for BruteAutocomplete {
    fn len(&self) -> usize {
        self.terms.len()
    }
}

impl Autocompletor for BruteAutocomplete {
    fn top_matches(&self, prefix: &str, k: usize) -> Vec<Term> {
        if k == 0 {
            return Vec::new();
        }

        let mut top = TopScoredTerms::new(k);
        let mut lower_bound: Option<Weight> = None;
        for (ix, term) in self.terms.iter().enumerate() {
            // A full heap only accepts weights at least as high as its worst
            if let Some(bound) = lower_bound {
                if term.weight.total_cmp(&bound) == Ordering::Less {
                    continue;
                }
            }
            if term.word.starts_with(prefix) {
                lower_bound = top.add(ix, term.weight);
            }
        }

        let kept = top.into_sorted_vec();
        if let Some(worst) = kept.last() {
            debug!("{} matches kept for {}, lowest {}", kept.len(), prefix, worst);
        }

        kept.iter()
            .map(|scored| self.terms[scored.term_ix].clone())
            .collect()
    }

    fn size_in_bytes(&self) -> usize {
        self.terms
            .iter()
            .map(|t| {
                self.options.bytes_per_char * t.word.chars().count() + self.options.bytes_per_weight
            })
            .sum()
    }
}
