//! Random material used when constructing cipher instances.
//!
//! Every randomized construction draws from an explicit [`RandomSource`]
//! rather than a process-global generator. The source is only used during
//! setup; message processing is fully deterministic afterwards. Seeding a
//! source makes whole cipher instances reproducible, which the tests lean
//! on heavily.

use {
    crate::bits::Bits,
    rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng},
};

/// A seedable source of uniform bits, permutations, and shuffles.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// A source seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// A deterministic source. Two sources built from the same seed yield
    /// identical output sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A uniform bit string of the given length.
    pub fn bits(&mut self, len: usize) -> Bits {
        let mut bits = Bits::with_capacity(len);
        for _ in 0..len {
            bits.push(self.rng.gen());
        }
        bits
    }

    /// A uniform permutation of `0..len`, sampled without replacement.
    pub fn uniform_permutation(&mut self, len: usize) -> Vec<usize> {
        let mut positions: Vec<usize> = (0..len).collect();
        positions.shuffle(&mut self.rng);
        positions
    }

    /// `count` independent uniform picks from `0..len`, with replacement.
    /// This is what expansion-style tables are built from.
    pub fn uniform_sequence(&mut self, len: usize, count: usize) -> Vec<usize> {
        (0..count).map(|_| self.rng.gen_range(0..len)).collect()
    }

    /// A shuffled copy of a character sequence.
    pub fn shuffled(&mut self, chars: &[char]) -> Vec<char> {
        let mut chars = chars.to_vec();
        chars.shuffle(&mut self.rng);
        chars
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

/// The unique inverse of a permutation: `inverse[p[i]] == i`.
pub fn inverse_permutation(permutation: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; permutation.len()];
    for (i, &j) in permutation.iter().enumerate() {
        inverse[j] = i;
    }
    inverse
}
