//! Tests for the key schedule.

use crate::{to_bits, Bits, Error, KeySchedule, Permutator, RandomSource};

#[test]
fn sixteen_subkeys_of_48_bits() {
    let key = to_bits("12345678").unwrap();
    let schedule = KeySchedule::derive(&key, 16, &Permutator::standard()).unwrap();
    assert_eq!(schedule.len(), 16);
    for round in 0..16 {
        assert_eq!(schedule.subkey(round).len(), 48);
    }
}

#[test]
fn reverse_iteration_mirrors_forward() {
    let key = to_bits("12345678").unwrap();
    let schedule = KeySchedule::derive(&key, 16, &Permutator::standard()).unwrap();
    let forward: Vec<_> = schedule.iter().collect();
    let mut backward: Vec<_> = schedule.iter_rev().collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn short_key_is_rejected() {
    let key = to_bits("1234").unwrap();
    assert!(matches!(
        KeySchedule::derive(&key, 16, &Permutator::standard()),
        Err(Error::InvalidKey { actual: 32 })
    ));
}

#[test]
fn zero_key_produces_zero_subkeys() {
    let key = Bits::repeat(false, 64);
    let schedule = KeySchedule::derive(&key, 16, &Permutator::standard()).unwrap();
    assert!(schedule.iter().all(|subkey| subkey.count_ones() == 0));
}

#[test]
fn seeded_schedules_agree() {
    let mut a = RandomSource::from_seed(9);
    let mut b = RandomSource::from_seed(9);
    let key_a = a.bits(64);
    let key_b = b.bits(64);
    let schedule_a = KeySchedule::derive(&key_a, 16, &Permutator::randomized(&mut a)).unwrap();
    let schedule_b = KeySchedule::derive(&key_b, 16, &Permutator::randomized(&mut b)).unwrap();
    for round in 0..16 {
        assert_eq!(schedule_a.subkey(round), schedule_b.subkey(round));
    }
}
