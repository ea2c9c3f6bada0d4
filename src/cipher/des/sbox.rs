//! The nonlinear substitution step.
//!
//! Eight S-boxes each map six input bits to four output bits, which is
//! where all of the cipher's nonlinearity lives. Given an input chunk
//! `(b5 b4 b3 b2 b1 b0)`, the outer bits select one of four rows and the
//! middle four bits select one of sixteen columns.

use {
    super::{EXPANDED_BITS, HALF_BITS},
    crate::{
        bits::{Bits, Bitstring},
        error::{Error, Result},
        random::RandomSource,
    },
    bitvec::field::BitField,
};

/// Rows in one substitution box.
const ROWS: usize = 4;

/// Columns in one substitution box.
const COLUMNS: usize = 16;

/// One 6-to-4-bit substitution box, stored as a row-major 4x16 table of
/// 4-bit values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sbox([u8; ROWS * COLUMNS]);

impl Sbox {
    /// A box from explicit entries, each of which must fit in four bits.
    pub fn new(entries: [u8; ROWS * COLUMNS]) -> Result<Self> {
        if entries.iter().any(|&entry| entry >= 16) {
            return Err(Error::InvalidTable(
                "substitution entry does not fit in four bits",
            ));
        }
        Ok(Self(entries))
    }

    /// A box whose four rows are independent uniform permutations of the
    /// sixteen 4-bit values.
    pub fn randomized(random: &mut RandomSource) -> Self {
        let mut entries = [0; ROWS * COLUMNS];
        for row in 0..ROWS {
            for (column, value) in random.uniform_permutation(COLUMNS).into_iter().enumerate() {
                entries[row * COLUMNS + column] = value as u8;
            }
        }
        Self(entries)
    }

    fn lookup(&self, row: usize, column: usize) -> u8 {
        self.0[row * COLUMNS + column]
    }
}

/// The eight substitution boxes, applied side by side across a 48-bit
/// input to produce 32 bits.
#[derive(Debug, Clone)]
pub struct SboxBank {
    boxes: [Sbox; 8],
}

impl SboxBank {
    /// The eight boxes published in FIPS 46-3.
    pub fn standard() -> Self {
        Self {
            boxes: SUBSTITUTION
                .map(|entries| Sbox::new(entries).expect("published S-box entries fit four bits")),
        }
    }

    /// Eight fresh random boxes.
    pub fn randomized(random: &mut RandomSource) -> Self {
        Self {
            boxes: std::array::from_fn(|_| Sbox::randomized(random)),
        }
    }

    /// A bank from explicit boxes.
    pub fn new(boxes: [Sbox; 8]) -> Self {
        Self { boxes }
    }

    /// Substitute a 48-bit input down to 32 bits, six bits through each box
    /// in turn.
    pub fn substitute(&self, bits: &Bitstring) -> Result<Bits> {
        if bits.len() != EXPANDED_BITS {
            return Err(Error::InvalidSize {
                what: "substitution input",
                expected: EXPANDED_BITS,
                actual: bits.len(),
            });
        }
        let mut out = Bits::with_capacity(HALF_BITS);
        for (sbox, chunk) in self.boxes.iter().zip(bits.chunks(6)) {
            // Chunk (b5 b4 b3 b2 b1 b0): the outer bits pick the row, the
            // middle four pick the column.
            let row = 2 * usize::from(chunk[0]) + usize::from(chunk[5]);
            let column = chunk[1..5].load_be::<u8>() as usize;
            let value = sbox.lookup(row, column);
            for i in (0..4).rev() {
                out.push(value >> i & 1 == 1);
            }
        }
        Ok(out)
    }
}

/// The eight substitution boxes of FIPS 46-3, row-major 4x16.
const SUBSTITUTION: [[u8; ROWS * COLUMNS]; 8] = [
    [
        14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7, //
        0, 15, 7, 4, 14, 2, 13, 1, 10, 6, 12, 11, 9, 5, 3, 8, //
        4, 1, 14, 8, 13, 6, 2, 11, 15, 12, 9, 7, 3, 10, 5, 0, //
        15, 12, 8, 2, 4, 9, 1, 7, 5, 11, 3, 14, 10, 0, 6, 13,
    ],
    [
        15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10, //
        3, 13, 4, 7, 15, 2, 8, 14, 12, 0, 1, 10, 6, 9, 11, 5, //
        0, 14, 7, 11, 10, 4, 13, 1, 5, 8, 12, 6, 9, 3, 2, 15, //
        13, 8, 10, 1, 3, 15, 4, 2, 11, 6, 7, 12, 0, 5, 14, 9,
    ],
    [
        10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8, //
        13, 7, 0, 9, 3, 4, 6, 10, 2, 8, 5, 14, 12, 11, 15, 1, //
        13, 6, 4, 9, 8, 15, 3, 0, 11, 1, 2, 12, 5, 10, 14, 7, //
        1, 10, 13, 0, 6, 9, 8, 7, 4, 15, 14, 3, 11, 5, 2, 12,
    ],
    [
        7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15, //
        13, 8, 11, 5, 6, 15, 0, 3, 4, 7, 2, 12, 1, 10, 14, 9, //
        10, 6, 9, 0, 12, 11, 7, 13, 15, 1, 3, 14, 5, 2, 8, 4, //
        3, 15, 0, 6, 10, 1, 13, 8, 9, 4, 5, 11, 12, 7, 2, 14,
    ],
    [
        2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9, //
        14, 11, 2, 12, 4, 7, 13, 1, 5, 0, 15, 10, 3, 9, 8, 6, //
        4, 2, 1, 11, 10, 13, 7, 8, 15, 9, 12, 5, 6, 3, 0, 14, //
        11, 8, 12, 7, 1, 14, 2, 13, 6, 15, 0, 9, 10, 4, 5, 3,
    ],
    [
        12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11, //
        10, 15, 4, 2, 7, 12, 9, 5, 6, 1, 13, 14, 0, 11, 3, 8, //
        9, 14, 15, 5, 2, 8, 12, 3, 7, 0, 4, 10, 1, 13, 11, 6, //
        4, 3, 2, 12, 9, 5, 15, 10, 11, 14, 1, 7, 6, 0, 8, 13,
    ],
    [
        4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1, //
        13, 0, 11, 7, 4, 9, 1, 10, 14, 3, 5, 12, 2, 15, 8, 6, //
        1, 4, 11, 13, 12, 3, 7, 14, 10, 15, 6, 8, 0, 5, 9, 2, //
        6, 11, 13, 8, 1, 4, 10, 7, 9, 5, 0, 15, 14, 2, 3, 12,
    ],
    [
        13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7, //
        1, 15, 13, 8, 10, 3, 7, 4, 12, 5, 6, 11, 0, 14, 9, 2, //
        7, 11, 4, 1, 9, 12, 14, 2, 0, 6, 10, 13, 15, 3, 5, 8, //
        2, 1, 14, 7, 4, 10, 8, 13, 15, 12, 9, 0, 3, 5, 6, 11,
    ],
];
