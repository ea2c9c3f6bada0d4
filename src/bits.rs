//! Bit strings and the character codec.
//!
//! Every value in the cipher core is a fixed-width sequence of bits, most
//! significant bit first. The codec maps between character strings and bit
//! strings at eight bits per character, which is what ties the string-level
//! cipher API to the bit-level block machinery.

use {
    crate::error::{Error, Result},
    bitvec::prelude::*,
};

/// An owned bit string.
pub type Bits = BitVec<u8, Msb0>;

/// A borrowed bit string.
pub type Bitstring = BitSlice<u8, Msb0>;

/// Bits per character in the codec.
pub const CHAR_BITS: usize = 8;

/// Encode a character string as a bit string, eight bits per character,
/// big-endian.
///
/// The cipher API is defined over the 128-character ASCII set, but any code
/// point below 256 is accepted so that ciphertext strings (whose bytes are
/// arbitrary after block encryption) can be fed back through the codec.
/// Wider characters cannot be framed in eight bits and fail with
/// [`Error::InvalidSize`].
pub fn to_bits(text: &str) -> Result<Bits> {
    let mut bits = Bits::with_capacity(text.len() * CHAR_BITS);
    for c in text.chars() {
        let code = u32::from(c);
        if code > 0xFF {
            return Err(Error::InvalidSize {
                what: "character code point",
                expected: CHAR_BITS,
                actual: (u32::BITS - code.leading_zeros()) as usize,
            });
        }
        for i in (0..CHAR_BITS).rev() {
            bits.push(code >> i & 1 == 1);
        }
    }
    Ok(bits)
}

/// Decode a bit string back into a character string.
///
/// The length must be a multiple of eight; each byte becomes the character
/// with that code point.
pub fn from_bits(bits: &Bitstring) -> Result<String> {
    if bits.len() % CHAR_BITS != 0 {
        return Err(Error::InvalidSize {
            what: "encoded text",
            expected: bits.len() / CHAR_BITS * CHAR_BITS,
            actual: bits.len(),
        });
    }
    Ok(bits
        .chunks(CHAR_BITS)
        .map(|byte| char::from(byte.load_be::<u8>()))
        .collect())
}
