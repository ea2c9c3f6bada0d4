//! Block framing with length-prefixed numeric padding.

use {
    crate::{
        bits::{Bits, Bitstring},
        cipher::des::BLOCK_BITS,
        error::{Error, Result},
    },
    bitvec::field::BitField,
    docext::docext,
};

/// Bits per padding byte.
const BYTE_BITS: usize = 8;

/// Pads messages out to a whole number of cipher blocks.
///
/// If a message is $n$ bytes short of the block boundary, $n$ bytes with
/// the value $n$ are appended. A message that already sits on the boundary
/// gains a whole extra block of padding ($B/8$ bytes of value $B/8$ for a
/// $B$-bit block), so the frame is always present and stripping is never
/// ambiguous for well-formed input.
#[docext]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPadding {
    block_bits: usize,
}

impl Default for BlockPadding {
    fn default() -> Self {
        Self {
            block_bits: BLOCK_BITS,
        }
    }
}

impl BlockPadding {
    /// A padder for the given block width, which must be a positive
    /// multiple of eight bits.
    pub fn new(block_bits: usize) -> Result<Self> {
        if block_bits == 0 || block_bits % BYTE_BITS != 0 {
            return Err(Error::InvalidPadding(
                "block size must be a positive multiple of 8 bits",
            ));
        }
        Ok(Self { block_bits })
    }

    /// The block width in bits.
    pub fn block_bits(&self) -> usize {
        self.block_bits
    }

    /// Append the padding frame and split the result into blocks. The
    /// input must be byte-aligned, since the frame is made of whole bytes.
    pub fn pad_and_split(&self, bits: &Bitstring) -> Result<Vec<Bits>> {
        if bits.len() % BYTE_BITS != 0 {
            return Err(Error::InvalidSize {
                what: "padding input",
                expected: bits.len() / BYTE_BITS * BYTE_BITS,
                actual: bits.len(),
            });
        }
        let remainder = bits.len() % self.block_bits;
        let padding_bits = if remainder == 0 {
            self.block_bits
        } else {
            self.block_bits - remainder
        };
        let padding_bytes = padding_bits / BYTE_BITS;
        let mut padded = bits.to_bitvec();
        for _ in 0..padding_bytes {
            for i in (0..BYTE_BITS).rev() {
                padded.push(padding_bytes >> i & 1 == 1);
            }
        }
        Ok(padded
            .chunks(self.block_bits)
            .map(|block| block.to_bitvec())
            .collect())
    }

    /// Remove the padding frame.
    ///
    /// The strip is tolerant: if the final byte does not name a plausible
    /// padding length, or the tail does not consist of that many copies of
    /// it, the input is returned unchanged rather than rejected.
    pub fn strip(&self, mut bits: Bits) -> Bits {
        if bits.len() < BYTE_BITS {
            return bits;
        }
        let count = bits[bits.len() - BYTE_BITS..].load_be::<u8>() as usize;
        if count < 1 || count > self.block_bits / BYTE_BITS || bits.len() < count * BYTE_BITS {
            return bits;
        }
        let tail = &bits[bits.len() - count * BYTE_BITS..];
        if tail
            .chunks(BYTE_BITS)
            .any(|byte| byte.load_be::<u8>() as usize != count)
        {
            return bits;
        }
        let keep = bits.len() - count * BYTE_BITS;
        bits.truncate(keep);
        bits
    }
}
