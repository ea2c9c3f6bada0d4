//! Derivation of the round subkeys.

use {
    super::{table::Permutator, EXPANDED_BITS, KEY_BITS, REDUCED_KEY_BITS},
    crate::{
        bits::{Bits, Bitstring},
        error::{Error, Result},
    },
};

/// The round subkeys, derived once from the master key.
///
/// PC-1 reduces the 64-bit key to 56 bits and splits it into two 28-bit
/// halves. Every round, both halves rotate left by one position and PC-2
/// extracts a 48-bit subkey from their concatenation. Encryption walks the
/// subkeys in round order, decryption in reverse; the derivation itself is
/// one-way and nothing here inverts PC-1 or PC-2.
#[derive(Debug, Clone)]
pub struct KeySchedule {
    subkeys: Vec<Bits>,
}

impl KeySchedule {
    /// Derive one subkey per round from a 64-bit key.
    pub fn derive(key: &Bitstring, rounds: usize, permutator: &Permutator) -> Result<Self> {
        if key.len() != KEY_BITS {
            return Err(Error::InvalidKey { actual: key.len() });
        }
        let (reduced, _parity) = permutator.permuted_choice_1(key)?;
        let mut c = reduced[..REDUCED_KEY_BITS / 2].to_bitvec();
        let mut d = reduced[REDUCED_KEY_BITS / 2..].to_bitvec();
        let mut subkeys = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            c.rotate_left(1);
            d.rotate_left(1);
            let mut joined = c.clone();
            joined.extend_from_bitslice(&d);
            let subkey = permutator.permuted_choice_2(&joined)?;
            if subkey.len() != EXPANDED_BITS {
                return Err(Error::InvalidSize {
                    what: "round subkey",
                    expected: EXPANDED_BITS,
                    actual: subkey.len(),
                });
            }
            subkeys.push(subkey);
        }
        Ok(Self { subkeys })
    }

    /// The number of rounds covered.
    pub fn len(&self) -> usize {
        self.subkeys.len()
    }

    /// The subkey for one round.
    pub fn subkey(&self, round: usize) -> &Bitstring {
        &self.subkeys[round]
    }

    /// Subkeys in round order, for encryption.
    pub fn iter(&self) -> impl Iterator<Item = &Bitstring> + '_ {
        self.subkeys.iter().map(Bits::as_bitslice)
    }

    /// Subkeys in reverse round order, for decryption.
    pub fn iter_rev(&self) -> impl Iterator<Item = &Bitstring> + '_ {
        self.subkeys.iter().rev().map(Bits::as_bitslice)
    }
}
