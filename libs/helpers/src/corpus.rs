use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Poisson};

use prefix_autocomplete::Weight;

/// Parallel term and weight columns
pub struct TestCorpus {
    pub terms: Vec<String>,
    pub weights: Vec<Weight>,
}

pub fn create_word(alphabet: &[char], lambda_length: f64, rng: &mut StdRng) -> String {
    let poi = Poisson::new(lambda_length).unwrap();
    let length = 1 + poi.sample(rng) as usize;

    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

impl TestCorpus {
    /// Creates a random corpus
    ///
    /// A small alphabet makes words share prefixes; rounding weights
    /// creates ties.
    pub fn new(
        term_count: usize,
        alphabet: &[char],
        lambda_length: f64,
        round_weights: bool,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        let log_normal = LogNormal::new(0., 1.).unwrap();

        let mut terms = Vec::with_capacity(term_count);
        let mut weights = Vec::with_capacity(term_count);
        for _ in 0..term_count {
            terms.push(create_word(alphabet, lambda_length, &mut rng));

            let weight: Weight = log_normal.sample(&mut rng);
            weights.push(if round_weights { weight.round() } else { weight });
        }

        Self { terms, weights }
    }
}
