//! Tests for permutation tables and the permutator wrappers.

use crate::{to_bits, Bits, Error, Permutator, RandomSource, Table};

#[test]
fn out_of_range_entry_is_rejected() {
    assert!(matches!(
        Table::spread(vec![0, 4], 4),
        Err(Error::InvalidTable(_))
    ));
}

#[test]
fn duplicate_entry_in_unique_table_is_rejected() {
    assert!(matches!(
        Table::unique(vec![0, 1, 1, 3], 4),
        Err(Error::InvalidTable(_))
    ));
    // The same entries are fine for an expansion-style table.
    assert!(Table::spread(vec![0, 1, 1, 3], 4).is_ok());
}

#[test]
fn apply_reorders_bits() {
    let table = Table::unique(vec![3, 0, 1, 2], 4).unwrap();
    let mut bits = Bits::new();
    for bit in [true, false, false, false] {
        bits.push(bit);
    }
    let out = table.apply(&bits).unwrap();
    let actual: Vec<bool> = out.iter().by_vals().collect();
    assert_eq!(actual, vec![false, true, false, false]);
}

#[test]
fn apply_checks_input_width() {
    let table = Table::unique(vec![0, 1], 2).unwrap();
    let bits = to_bits("A").unwrap();
    assert!(matches!(
        table.apply(&bits),
        Err(Error::InvalidSize { .. })
    ));
}

#[test]
fn initial_permutation_inverts() {
    let mut random = RandomSource::from_seed(5);
    for permutator in [Permutator::standard(), Permutator::randomized(&mut random)] {
        let block = random.bits(64);
        let permuted = permutator.initial_permutation(&block).unwrap();
        let recovered = permutator.inverse_initial_permutation(&permuted).unwrap();
        assert_eq!(recovered, block);
    }
}

#[test]
fn standard_initial_permutation_picks_bit_58_first() {
    // The published table's first entry is position 58, index 57.
    let mut block = Bits::repeat(false, 64);
    block.set(57, true);
    let permuted = Permutator::standard().initial_permutation(&block).unwrap();
    assert!(permuted[0]);
    assert_eq!(permuted.count_ones(), 1);
}

#[test]
fn choice_wrappers_split_key_and_parity() {
    let mut random = RandomSource::from_seed(6);
    for permutator in [Permutator::standard(), Permutator::randomized(&mut random)] {
        let key = random.bits(64);
        let (reduced, parity) = permutator.permuted_choice_1(&key).unwrap();
        assert_eq!(reduced.len(), 56);
        assert_eq!(parity.len(), 8);
        // Every key bit lands in exactly one of the two outputs.
        assert_eq!(
            reduced.count_ones() + parity.count_ones(),
            key.count_ones()
        );
        let subkey = permutator.permuted_choice_2(&reduced).unwrap();
        assert_eq!(subkey.len(), 48);
    }
}

#[test]
fn expansion_and_p_box_have_declared_widths() {
    let mut random = RandomSource::from_seed(7);
    for permutator in [Permutator::standard(), Permutator::randomized(&mut random)] {
        let half = random.bits(32);
        assert_eq!(permutator.expansion(&half).unwrap().len(), 48);
        assert_eq!(permutator.p_box(&half).unwrap().len(), 32);
        // The straight permutation only moves bits around.
        assert_eq!(
            permutator.p_box(&half).unwrap().count_ones(),
            half.count_ones()
        );
    }
}

#[test]
fn mismatched_inverse_is_rejected() {
    let reversal: Vec<usize> = (0..64).rev().collect();
    let identity: Vec<usize> = (0..64).collect();
    let result = Permutator::new(
        Table::unique(reversal, 64).unwrap(),
        // The reversal is its own inverse, so the identity does not invert
        // it.
        Table::unique(identity, 64).unwrap(),
        Table::spread(vec![0; 48], 32).unwrap(),
        Table::unique((0..64).filter(|i| i % 8 != 0).collect(), 64).unwrap(),
        crate::PermutedChoice2::Grouped(Table::unique((0..56).collect(), 56).unwrap()),
        Table::unique((0..32).collect(), 32).unwrap(),
    );
    assert!(matches!(result, Err(Error::InvalidTable(_))));
}
