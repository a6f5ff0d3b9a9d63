//! Top-k prefix completion over a weighted vocabulary

pub mod base;
pub mod builder;
pub mod error;
pub mod index;
pub mod search;

pub use base::{Term, Weight};
pub use builder::IndexOptions;
pub use error::{Error, Result};
pub use index::{Autocompletor, PrefixIndex};
pub use search::brute::BruteAutocomplete;
