//! Error types for the codec layer.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur when decoding alphabet-packed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input contained a character outside the 62-symbol alphabet.
    #[error("invalid symbol {ch:?} at position {pos}")]
    InvalidSymbol {
        /// The offending character.
        ch: char,
        /// Its character position in the input.
        pos: usize,
    },
}
