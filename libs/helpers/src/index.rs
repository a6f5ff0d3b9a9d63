use std::cmp::Ordering;

use log::debug;
use ntest::assert_about_eq;

use prefix_autocomplete::{PrefixIndex, Term};

/// Checks that every bucket only holds terms starting with its prefix,
/// sorted by decreasing weight
pub fn check_index_invariants(index: &PrefixIndex) {
    let max_length = index.options().max_prefix_length;

    for prefix in index.prefixes() {
        assert!(
            prefix.chars().count() <= max_length,
            "Prefix {} is longer than {}",
            prefix,
            max_length
        );

        let bucket: Vec<&Term> = index.matches(prefix).collect();
        debug!("Checking prefix {} ({} terms)", prefix, bucket.len());
        assert!(!bucket.is_empty(), "Bucket {} is empty", prefix);

        for term in bucket.iter() {
            assert!(
                term.word.starts_with(prefix),
                "{} does not start with {}",
                term.word,
                prefix
            );
        }
        for pair in bucket.windows(2) {
            assert!(
                pair[0].weight.total_cmp(&pair[1].weight) != Ordering::Less,
                "Bucket {} is not sorted: {} before {}",
                prefix,
                pair[0],
                pair[1]
            );
        }
    }
}

/// Test if two result lists are the same
pub fn check_same_terms(expected: &[Term], observed: &[Term], weight_eps: f64) {
    assert!(
        observed.len() == expected.len(),
        "Size differ {} vs {}",
        observed.len(),
        expected.len()
    );
    for (ix, (a, b)) in expected.iter().zip(observed.iter()).enumerate() {
        assert!(
            a.word == b.word,
            "{}th element differ: expected {}, got {}",
            ix,
            a,
            b
        );
        if weight_eps > 0. {
            assert_about_eq!(a.weight, b.weight, weight_eps);
        } else {
            assert!(
                a.weight.total_cmp(&b.weight) == Ordering::Equal,
                "{}th element differ: expected {}, got {}",
                ix,
                a,
                b
            );
        }
    }
}
