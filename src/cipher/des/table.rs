//! Permutation and expansion tables.
//!
//! A table is a list of source indices: output bit `i` is input bit
//! `table[i]`. That single primitive covers every reordering step in the
//! cipher; the [`Permutator`] wrappers only add width checks on top of it.

use {
    super::{BLOCK_BITS, EXPANDED_BITS, HALF_BITS, KEY_BITS, REDUCED_KEY_BITS},
    crate::{
        bits::{Bits, Bitstring},
        error::{Error, Result},
        random::{inverse_permutation, RandomSource},
    },
    std::mem,
};

/// An immutable permutation or expansion table over a declared input width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    entries: Vec<usize>,
    input: usize,
}

impl Table {
    /// A table whose entries may repeat source indices, as the expansion
    /// table does. Every entry must be in range for the input width.
    pub fn spread(entries: Vec<usize>, input: usize) -> Result<Self> {
        if entries.iter().any(|&entry| entry >= input) {
            return Err(Error::InvalidTable(
                "entry references an out-of-range source index",
            ));
        }
        Ok(Self { entries, input })
    }

    /// A table whose entries must additionally be duplicate-free. A unique
    /// table with as many entries as input bits is a permutation.
    pub fn unique(entries: Vec<usize>, input: usize) -> Result<Self> {
        let table = Self::spread(entries, input)?;
        let mut seen = vec![false; input];
        for &entry in &table.entries {
            if mem::replace(&mut seen[entry], true) {
                return Err(Error::InvalidTable("duplicate entry in a unique table"));
            }
        }
        Ok(table)
    }

    /// Number of output bits the table produces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Declared input width in bits.
    pub fn input(&self) -> usize {
        self.input
    }

    /// The source index of each output bit.
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Apply the table: output bit `i` is input bit `entries[i]`. The input
    /// must match the declared width exactly.
    pub fn apply(&self, bits: &Bitstring) -> Result<Bits> {
        if bits.len() != self.input {
            return Err(Error::InvalidSize {
                what: "permutation input",
                expected: self.input,
                actual: bits.len(),
            });
        }
        let mut out = Bits::with_capacity(self.entries.len());
        for &entry in &self.entries {
            out.push(bits[entry]);
        }
        Ok(out)
    }
}

/// The two documented realizations of the PC-2 step of the key schedule.
///
/// The schedule only ever applies PC-2 forward, so neither realization is
/// required (or assumed) to be invertible.
#[derive(Debug, Clone)]
pub enum PermutedChoice2 {
    /// The published direct 56-to-48-bit table.
    Direct(Table),
    /// A 56-bit permutation followed by dropping the first bit of each
    /// seven-bit group, leaving 48 bits.
    Grouped(Table),
}

impl PermutedChoice2 {
    fn apply(&self, key: &Bitstring) -> Result<Bits> {
        match self {
            Self::Direct(table) => table.apply(key),
            Self::Grouped(table) => {
                let permuted = table.apply(key)?;
                let mut out = Bits::with_capacity(EXPANDED_BITS);
                for (i, bit) in permuted.iter().by_vals().enumerate() {
                    if i % 7 != 0 {
                        out.push(bit);
                    }
                }
                Ok(out)
            }
        }
    }
}

/// The six tables of the block cipher and their width-checked application.
///
/// Comes in two families: [`Permutator::standard`] carries the published
/// DES constants, [`Permutator::randomized`] synthesizes a fresh set per
/// instance. In both, the inverse initial permutation genuinely inverts the
/// initial permutation; that relation is validated at construction.
#[derive(Debug, Clone)]
pub struct Permutator {
    initial: Table,
    inverse_initial: Table,
    expansion: Table,
    choice1: Table,
    parity: Table,
    choice2: PermutedChoice2,
    p_box: Table,
}

impl Permutator {
    /// Assemble and validate a full table set. The parity table is derived
    /// as the complement of the PC-1 positions.
    pub fn new(
        initial: Table,
        inverse_initial: Table,
        expansion: Table,
        choice1: Table,
        choice2: PermutedChoice2,
        p_box: Table,
    ) -> Result<Self> {
        check(&initial, BLOCK_BITS, BLOCK_BITS, "initial permutation")?;
        check(
            &inverse_initial,
            BLOCK_BITS,
            BLOCK_BITS,
            "inverse initial permutation",
        )?;
        if inverse_permutation(initial.entries()) != inverse_initial.entries() {
            return Err(Error::InvalidTable(
                "inverse initial permutation does not invert the initial permutation",
            ));
        }
        check(&expansion, HALF_BITS, EXPANDED_BITS, "expansion table")?;
        check(&choice1, KEY_BITS, REDUCED_KEY_BITS, "permuted choice 1")?;
        match &choice2 {
            PermutedChoice2::Direct(table) => {
                check(table, REDUCED_KEY_BITS, EXPANDED_BITS, "permuted choice 2")?
            }
            PermutedChoice2::Grouped(table) => check(
                table,
                REDUCED_KEY_BITS,
                REDUCED_KEY_BITS,
                "permuted choice 2",
            )?,
        }
        check(&p_box, HALF_BITS, HALF_BITS, "straight permutation")?;

        let mut picked = vec![false; KEY_BITS];
        for &entry in choice1.entries() {
            picked[entry] = true;
        }
        let parity = (0..KEY_BITS).filter(|&position| !picked[position]).collect();
        let parity = Table::unique(parity, KEY_BITS)
            .expect("the complement of a unique table is unique");

        Ok(Self {
            initial,
            inverse_initial,
            expansion,
            choice1,
            parity,
            choice2,
            p_box,
        })
    }

    /// The published DES tables.
    pub fn standard() -> Self {
        Self::try_standard().expect("published DES tables are valid")
    }

    fn try_standard() -> Result<Self> {
        Self::new(
            Table::unique(published(&INITIAL_PERMUTATION), BLOCK_BITS)?,
            Table::unique(published(&INVERSE_INITIAL_PERMUTATION), BLOCK_BITS)?,
            Table::spread(published(&EXPANSION), HALF_BITS)?,
            Table::unique(published(&PERMUTED_CHOICE_1), KEY_BITS)?,
            PermutedChoice2::Direct(Table::unique(
                published(&PERMUTED_CHOICE_2),
                REDUCED_KEY_BITS,
            )?),
            Table::unique(published(&STRAIGHT_PERMUTATION), HALF_BITS)?,
        )
    }

    /// A fresh random table set: a uniform initial permutation with its
    /// computed inverse, a with-replacement expansion table, PC-1 keeping
    /// the last seven bits of every key byte (the first bit of each byte is
    /// the parity position), PC-2 in its grouped two-stage realization, and
    /// a uniform straight permutation.
    pub fn randomized(random: &mut RandomSource) -> Self {
        Self::try_randomized(random).expect("freshly sampled tables are valid")
    }

    fn try_randomized(random: &mut RandomSource) -> Result<Self> {
        let initial = random.uniform_permutation(BLOCK_BITS);
        let inverse = inverse_permutation(&initial);
        let choice1 = (0..KEY_BITS).filter(|position| position % 8 != 0).collect();
        Self::new(
            Table::unique(initial, BLOCK_BITS)?,
            Table::unique(inverse, BLOCK_BITS)?,
            Table::spread(random.uniform_sequence(HALF_BITS, EXPANDED_BITS), HALF_BITS)?,
            Table::unique(choice1, KEY_BITS)?,
            PermutedChoice2::Grouped(Table::unique(
                random.uniform_permutation(REDUCED_KEY_BITS),
                REDUCED_KEY_BITS,
            )?),
            Table::unique(random.uniform_permutation(HALF_BITS), HALF_BITS)?,
        )
    }

    /// Reorder a 64-bit block at the start of the block transform.
    pub fn initial_permutation(&self, block: &Bitstring) -> Result<Bits> {
        self.initial.apply(block)
    }

    /// Undo the initial reordering at the end of the block transform.
    pub fn inverse_initial_permutation(&self, block: &Bitstring) -> Result<Bits> {
        self.inverse_initial.apply(block)
    }

    /// Expand a 32-bit half-block to 48 bits, duplicating edge bits.
    pub fn expansion(&self, half: &Bitstring) -> Result<Bits> {
        self.expansion.apply(half)
    }

    /// The straight 32-bit permutation applied after substitution.
    pub fn p_box(&self, half: &Bitstring) -> Result<Bits> {
        self.p_box.apply(half)
    }

    /// Split a 64-bit key into its 56 schedule bits and the 8 parity bits.
    /// The schedule discards the parity half; it is returned so the split
    /// can be observed and tested.
    pub fn permuted_choice_1(&self, key: &Bitstring) -> Result<(Bits, Bits)> {
        Ok((self.choice1.apply(key)?, self.parity.apply(key)?))
    }

    /// Extract a 48-bit round subkey from the rotated 56-bit key halves.
    pub fn permuted_choice_2(&self, key: &Bitstring) -> Result<Bits> {
        self.choice2.apply(key)
    }
}

fn check(table: &Table, input: usize, output: usize, what: &'static str) -> Result<()> {
    if table.input() != input {
        return Err(Error::InvalidSize {
            what,
            expected: input,
            actual: table.input(),
        });
    }
    if table.len() != output {
        return Err(Error::InvalidSize {
            what,
            expected: output,
            actual: table.len(),
        });
    }
    Ok(())
}

/// Published DES tables are written with 1-based positions; shift them down
/// to indices.
fn published(entries: &[usize]) -> Vec<usize> {
    entries.iter().map(|&entry| entry - 1).collect()
}

/// The initial permutation (IP), as published in FIPS 46-3.
const INITIAL_PERMUTATION: [usize; 64] = [
    58, 50, 42, 34, 26, 18, 10, 2, //
    60, 52, 44, 36, 28, 20, 12, 4, //
    62, 54, 46, 38, 30, 22, 14, 6, //
    64, 56, 48, 40, 32, 24, 16, 8, //
    57, 49, 41, 33, 25, 17, 9, 1, //
    59, 51, 43, 35, 27, 19, 11, 3, //
    61, 53, 45, 37, 29, 21, 13, 5, //
    63, 55, 47, 39, 31, 23, 15, 7,
];

/// The inverse initial permutation (IP⁻¹), as published in FIPS 46-3.
const INVERSE_INITIAL_PERMUTATION: [usize; 64] = [
    40, 8, 48, 16, 56, 24, 64, 32, //
    39, 7, 47, 15, 55, 23, 63, 31, //
    38, 6, 46, 14, 54, 22, 62, 30, //
    37, 5, 45, 13, 53, 21, 61, 29, //
    36, 4, 44, 12, 52, 20, 60, 28, //
    35, 3, 43, 11, 51, 19, 59, 27, //
    34, 2, 42, 10, 50, 18, 58, 26, //
    33, 1, 41, 9, 49, 17, 57, 25,
];

/// The expansion table (E), 32 to 48 bits, as published in FIPS 46-3.
const EXPANSION: [usize; 48] = [
    32, 1, 2, 3, 4, 5, //
    4, 5, 6, 7, 8, 9, //
    8, 9, 10, 11, 12, 13, //
    12, 13, 14, 15, 16, 17, //
    16, 17, 18, 19, 20, 21, //
    20, 21, 22, 23, 24, 25, //
    24, 25, 26, 27, 28, 29, //
    28, 29, 30, 31, 32, 1,
];

/// Permuted choice 1 (PC-1), 64 to 56 bits, as published in FIPS 46-3. The
/// eight positions it skips are the key's parity bits.
const PERMUTED_CHOICE_1: [usize; 56] = [
    57, 49, 41, 33, 25, 17, 9, //
    1, 58, 50, 42, 34, 26, 18, //
    10, 2, 59, 51, 43, 35, 27, //
    19, 11, 3, 60, 52, 44, 36, //
    63, 55, 47, 39, 31, 23, 15, //
    7, 62, 54, 46, 38, 30, 22, //
    14, 6, 61, 53, 45, 37, 29, //
    21, 13, 5, 28, 20, 12, 4,
];

/// Permuted choice 2 (PC-2), 56 to 48 bits, as published in FIPS 46-3.
const PERMUTED_CHOICE_2: [usize; 48] = [
    14, 17, 11, 24, 1, 5, //
    3, 28, 15, 6, 21, 10, //
    23, 19, 12, 4, 26, 8, //
    16, 7, 27, 20, 13, 2, //
    41, 52, 31, 37, 47, 55, //
    30, 40, 51, 45, 33, 48, //
    44, 49, 39, 56, 34, 53, //
    46, 42, 50, 36, 29, 32,
];

/// The straight permutation (P) applied after substitution, as published in
/// FIPS 46-3.
const STRAIGHT_PERMUTATION: [usize; 32] = [
    16, 7, 20, 21, //
    29, 12, 28, 17, //
    1, 15, 23, 26, //
    5, 18, 31, 10, //
    2, 8, 24, 14, //
    32, 27, 3, 9, //
    19, 13, 30, 6, //
    22, 11, 4, 25,
];
