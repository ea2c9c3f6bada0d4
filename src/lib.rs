//! A didactic two-layer symmetric cipher: a three-rotor substitution
//! machine composed with a Feistel block cipher of the DES family.
//!
//! Encryption runs the rotor layer first and the block layer second;
//! decryption peels the layers in the opposite order. Nothing here is
//! secure. The construction exists to make the moving parts of a classical
//! machine and a Feistel network easy to see, vary, and test.

#[cfg(test)]
mod test;

mod bits;
mod cipher;
mod error;
mod random;

pub use {
    bits::{from_bits, to_bits, Bits, Bitstring},
    cipher::{
        Alphabet,
        BlockPadding,
        Cipher,
        Des,
        HybridCipher,
        KeySchedule,
        Permutator,
        PermutedChoice2,
        RotorMachine,
        RotorState,
        Sbox,
        SboxBank,
        Table,
        BLOCK_BITS,
        KEY_BITS,
    },
    error::{Error, Result},
    random::{inverse_permutation, RandomSource},
};
