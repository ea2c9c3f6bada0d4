use crate::error::Result;

mod des;
mod hybrid;
mod padding;
mod rotor;

pub use {
    des::{Des, KeySchedule, Permutator, PermutedChoice2, Sbox, SboxBank, Table, BLOCK_BITS, KEY_BITS},
    hybrid::HybridCipher,
    padding::BlockPadding,
    rotor::{Alphabet, RotorMachine, RotorState},
};

/// A cipher maps character strings to character strings, in both directions.
///
/// Implementations must satisfy
/// ```text
/// decrypt(encrypt(plaintext)) == plaintext
/// ```
/// for every string over their accepted character domain. The methods take
/// `&mut self` because some implementations carry per-message state: the
/// rotor machine steps its wheels, and the hybrid cipher retains its
/// intermediate stages for inspection.
pub trait Cipher {
    /// Encrypt the plaintext.
    fn encrypt(&mut self, plaintext: &str) -> Result<String>;

    /// Decrypt the ciphertext.
    fn decrypt(&mut self, ciphertext: &str) -> Result<String>;
}
