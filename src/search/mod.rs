pub mod brute;

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::base::{TermIndex, Weight};

/// A candidate term: its position in the corpus and its weight
#[derive(Clone, Copy, Debug)]
pub struct ScoredTerm {
    pub term_ix: TermIndex,
    pub weight: Weight,
}

impl std::fmt::Display for ScoredTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.term_ix, self.weight)
    }
}

impl PartialEq for ScoredTerm {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredTerm {}

impl PartialOrd for ScoredTerm {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Better candidates are smaller: higher weight first, then earlier in the
// corpus
impl Ord for ScoredTerm {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.term_ix.cmp(&other.term_ix))
    }
}

/// Keeps the `top_k` best candidates seen so far
pub struct TopScoredTerms {
    heap: BinaryHeap<ScoredTerm>,
    top_k: usize,
}

impl TopScoredTerms {
    pub fn new(top_k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(top_k),
            top_k,
        }
    }

    /// Add a new candidate, and returns the lowest kept weight once
    /// `top_k` candidates are held
    pub fn add(&mut self, term_ix: TermIndex, weight: Weight) -> Option<Weight> {
        let candidate = ScoredTerm { term_ix, weight };
        if self.heap.len() < self.top_k {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }

        match self.heap.peek() {
            Some(worst) if self.heap.len() >= self.top_k => Some(worst.weight),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best candidates first
    pub fn into_sorted_vec(self) -> Vec<ScoredTerm> {
        self.heap.into_sorted_vec()
    }
}
