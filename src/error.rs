//! Library-wide error and result types.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the cipher components can produce.
///
/// Every failure surfaces synchronously at the operation boundary; nothing
/// is retried and there are no partial successes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bit string or count does not match what its context requires.
    #[error("{what}: expected {expected}, got {actual}")]
    InvalidSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A permutation table references an out-of-range source index, or a
    /// table that must be duplicate-free is not.
    #[error("invalid table: {0}")]
    InvalidTable(&'static str),
    /// A rotor wiring is not a permutation of the machine's alphabet.
    #[error("invalid rotor: {0}")]
    InvalidRotor(String),
    /// The cipher key does not have the required width.
    #[error("key must be 64 bits, got {actual}")]
    InvalidKey { actual: usize },
    /// A ciphertext's bit length is not a multiple of the block size.
    #[error("ciphertext length {bits} bits is not a multiple of the block size")]
    CorruptCiphertext { bits: usize },
    /// A padding configuration is malformed.
    #[error("invalid padding: {0}")]
    InvalidPadding(&'static str),
    /// An intermediate result was requested before the operation that
    /// produces it has run.
    #[error("{0} is not set")]
    StateNotSet(&'static str),
}
