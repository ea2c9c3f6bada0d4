//! A Feistel block cipher of the DES family.
//!
//! The cipher works on 64-bit blocks under a 64-bit key. A block passes
//! through an initial permutation, is split into two 32-bit halves, and the
//! halves then run through sixteen Feistel rounds
//!
//! ```text
//! (L, R) -> (R, L xor F(R, K))
//! ```
//!
//! where the round function `F` expands the right half to 48 bits, mixes in
//! a 48-bit round subkey by XOR, substitutes the result down to 32 bits
//! through eight nonlinear S-boxes, and finally applies a straight 32-bit
//! permutation. After the last round the halves are swapped once and the
//! inverse initial permutation produces the output block. Because the
//! Feistel structure never needs to invert `F`, decryption is the same walk
//! with the subkeys taken in reverse order.
//!
//! The permutation tables and S-boxes come in two families: the published
//! DES constants (so the classic test vectors are reproducible) and fresh
//! per-instance random tables for taking the machinery apart in class. See
//! [`Permutator`] and [`SboxBank`].
//!
//! Messages of arbitrary length are handled in ECB fashion: the plaintext
//! is encoded to bits, padded to a whole number of blocks, and each block
//! is encrypted independently.

mod sbox;
mod schedule;
mod table;

pub use {
    sbox::{Sbox, SboxBank},
    schedule::KeySchedule,
    table::{Permutator, PermutedChoice2, Table},
};

use {
    crate::{
        bits::{from_bits, to_bits, Bits, Bitstring},
        cipher::{padding::BlockPadding, Cipher},
        error::{Error, Result},
        random::RandomSource,
    },
    std::mem,
};

/// Block width in bits.
pub const BLOCK_BITS: usize = 64;

/// Key width in bits.
pub const KEY_BITS: usize = 64;

/// Width of one Feistel half-block.
const HALF_BITS: usize = BLOCK_BITS / 2;

/// Width of an expanded half-block, and of a round subkey.
pub(crate) const EXPANDED_BITS: usize = 48;

/// Width of the key after the parity positions are dropped.
pub(crate) const REDUCED_KEY_BITS: usize = 56;

/// Rounds used when no explicit count is given.
const DEFAULT_ROUNDS: usize = 16;

/// The block cipher: key schedule, permutation tables, S-boxes, and the
/// round walk, bundled behind a string-level encrypt/decrypt pair.
#[derive(Debug, Clone)]
pub struct Des {
    key: Bits,
    schedule: KeySchedule,
    permutator: Permutator,
    sboxes: SboxBank,
    padding: BlockPadding,
}

impl Des {
    /// A cipher over the published DES tables and S-boxes, with the default
    /// sixteen rounds.
    pub fn standard(key: Bits) -> Result<Self> {
        Self::new(key, DEFAULT_ROUNDS, Permutator::standard(), SboxBank::standard())
    }

    /// A cipher with a fresh random key and per-instance random tables and
    /// S-boxes, with the default sixteen rounds.
    pub fn randomized(random: &mut RandomSource) -> Self {
        let key = random.bits(KEY_BITS);
        let permutator = Permutator::randomized(random);
        let sboxes = SboxBank::randomized(random);
        Self::new(key, DEFAULT_ROUNDS, permutator, sboxes)
            .expect("a 64-bit key was just drawn")
    }

    /// A cipher from explicit parts. The key must be exactly 64 bits and
    /// the round count at least one.
    pub fn new(
        key: Bits,
        rounds: usize,
        permutator: Permutator,
        sboxes: SboxBank,
    ) -> Result<Self> {
        if rounds == 0 {
            return Err(Error::InvalidSize {
                what: "round count",
                expected: DEFAULT_ROUNDS,
                actual: 0,
            });
        }
        if key.len() != KEY_BITS {
            return Err(Error::InvalidKey { actual: key.len() });
        }
        let schedule = KeySchedule::derive(&key, rounds, &permutator)?;
        tracing::debug!("derived {} round subkeys", schedule.len());
        Ok(Self {
            key,
            schedule,
            permutator,
            sboxes,
            padding: BlockPadding::default(),
        })
    }

    /// The 64-bit master key.
    pub fn key(&self) -> &Bitstring {
        &self.key
    }

    /// The number of Feistel rounds.
    pub fn rounds(&self) -> usize {
        self.schedule.len()
    }

    /// Encrypt a single 64-bit block.
    pub fn encrypt_block(&self, block: &Bitstring) -> Result<Bits> {
        self.transform(block, self.schedule.iter())
    }

    /// Decrypt a single 64-bit block. Identical to encryption except that
    /// the subkeys are traversed in reverse round order.
    pub fn decrypt_block(&self, block: &Bitstring) -> Result<Bits> {
        self.transform(block, self.schedule.iter_rev())
    }

    /// Encrypt a message of arbitrary length: encode to bits, pad to whole
    /// blocks, encrypt each block, decode the concatenation.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let bits = to_bits(plaintext)?;
        let blocks = self.padding.pad_and_split(&bits)?;
        tracing::trace!("encrypting {} block(s)", blocks.len());
        let mut out = Bits::with_capacity(blocks.len() * BLOCK_BITS);
        for block in &blocks {
            out.extend_from_bitslice(&self.encrypt_block(block)?);
        }
        from_bits(&out)
    }

    /// Decrypt a message: decode to bits, decrypt each block, strip the
    /// padding frame, decode back to text.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        let bits = to_bits(ciphertext)?;
        if bits.len() % BLOCK_BITS != 0 {
            return Err(Error::CorruptCiphertext { bits: bits.len() });
        }
        tracing::trace!("decrypting {} block(s)", bits.len() / BLOCK_BITS);
        let mut out = Bits::with_capacity(bits.len());
        for block in bits.chunks(BLOCK_BITS) {
            out.extend_from_bitslice(&self.decrypt_block(block)?);
        }
        from_bits(&self.padding.strip(out))
    }

    /// The shared block walk: initial permutation, the Feistel rounds over
    /// the given subkey order, the final swap, inverse initial permutation.
    fn transform<'a>(
        &self,
        block: &Bitstring,
        subkeys: impl Iterator<Item = &'a Bitstring>,
    ) -> Result<Bits> {
        let permuted = self.permutator.initial_permutation(block)?;
        let mut left = permuted[..HALF_BITS].to_bitvec();
        let mut right = permuted[HALF_BITS..].to_bitvec();
        for subkey in subkeys {
            let mixed = xor(&left, &self.feistel(&right, subkey)?)?;
            left = mem::replace(&mut right, mixed);
        }
        // One last swap after the final round.
        let mut joined = right;
        joined.extend_from_bitslice(&left);
        self.permutator.inverse_initial_permutation(&joined)
    }

    /// The round function: expansion, key mixing, substitution, straight
    /// permutation.
    fn feistel(&self, right: &Bitstring, subkey: &Bitstring) -> Result<Bits> {
        let expanded = self.permutator.expansion(right)?;
        let mixed = xor(&expanded, subkey)?;
        let substituted = self.sboxes.substitute(&mixed)?;
        self.permutator.p_box(&substituted)
    }
}

impl Cipher for Des {
    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        Des::encrypt(self, plaintext)
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        Des::decrypt(self, ciphertext)
    }
}

/// XOR two bit strings of equal width.
fn xor(x: &Bitstring, y: &Bitstring) -> Result<Bits> {
    if x.len() != y.len() {
        return Err(Error::InvalidSize {
            what: "xor operand",
            expected: x.len(),
            actual: y.len(),
        });
    }
    let mut out = Bits::with_capacity(x.len());
    for i in 0..x.len() {
        out.push(x[i] ^ y[i]);
    }
    Ok(out)
}
