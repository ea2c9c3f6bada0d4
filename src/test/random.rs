//! Tests for the random source.

use crate::{inverse_permutation, RandomSource};

#[test]
fn seeded_sources_agree() {
    let mut a = RandomSource::from_seed(7);
    let mut b = RandomSource::from_seed(7);
    assert_eq!(a.bits(128), b.bits(128));
    assert_eq!(a.uniform_permutation(64), b.uniform_permutation(64));
    assert_eq!(a.uniform_sequence(32, 48), b.uniform_sequence(32, 48));
    assert_eq!(a.shuffled(&['x', 'y', 'z']), b.shuffled(&['x', 'y', 'z']));
}

#[test]
fn uniform_permutation_covers_the_range() {
    let mut random = RandomSource::from_seed(1);
    let mut permutation = random.uniform_permutation(56);
    permutation.sort_unstable();
    assert_eq!(permutation, (0..56).collect::<Vec<_>>());
}

#[test]
fn uniform_sequence_stays_in_range() {
    let mut random = RandomSource::from_seed(2);
    let sequence = random.uniform_sequence(32, 480);
    assert_eq!(sequence.len(), 480);
    assert!(sequence.into_iter().all(|pick| pick < 32));
}

#[test]
fn inverse_permutation_inverts() {
    let mut random = RandomSource::from_seed(3);
    let permutation = random.uniform_permutation(64);
    let inverse = inverse_permutation(&permutation);
    for (i, &p) in permutation.iter().enumerate() {
        assert_eq!(inverse[p], i);
    }
}

#[test]
fn bits_have_the_requested_length() {
    let mut random = RandomSource::from_seed(4);
    assert_eq!(random.bits(64).len(), 64);
    assert_eq!(random.bits(0).len(), 0);
}
