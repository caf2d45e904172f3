//! Error type shared by every block operation.

use thiserror::Error;

/// Precondition violations reported by block construction, arithmetic and codecs.
///
/// Every check runs before a result is built, so an error never leaves a
/// partially computed block behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Binary operation on blocks of different lengths.
    #[error("length mismatch: {left} bits vs {right} bits")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// Segmentation requested with a count of zero.
    #[error("segment count must be non-zero")]
    ZeroSegments,

    /// Block length is not a multiple of the segment count.
    #[error("{len} bits cannot be split into {segments} equal segments")]
    NotDivisible {
        /// Block length in bits.
        len: usize,
        /// Requested number of segments.
        segments: usize,
    },

    /// Segment index past the last segment.
    #[error("segment index {index} out of range for {segments} segments")]
    SegmentOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of segments.
        segments: usize,
    },

    /// Bit string contains something other than `0` or `1`.
    #[error("invalid bit character {ch:?} at position {position}")]
    InvalidBitChar {
        /// Offending character.
        ch: char,
        /// Character position in the input.
        position: usize,
    },

    /// Input length is not a multiple of the codec block size.
    #[error("{remainder} trailing byte(s) do not fill a {block_bytes}-byte block")]
    Truncated {
        /// Number of leftover bytes.
        remainder: usize,
        /// Configured block size in bytes.
        block_bytes: usize,
    },

    /// Codec configured with a zero block size.
    #[error("block size must be at least one byte")]
    ZeroBlockSize,

    /// Character code does not fit in a byte.
    #[error("character {ch:?} does not fit in 8 bits")]
    UnrepresentableChar {
        /// Offending character.
        ch: char,
    },

    /// Hex rendering of a block whose length is not a multiple of 4.
    #[error("{len} bits is not a whole number of nibbles")]
    NotNibbleAligned {
        /// Block length in bits.
        len: usize,
    },

    /// Byte rendering of a block whose length is not a multiple of 8.
    #[error("{len} bits is not a whole number of bytes")]
    NotByteAligned {
        /// Block length in bits.
        len: usize,
    },

    /// Integer conversion of a block wider than the target type.
    #[error("{len} bits exceed the {max}-bit integer range")]
    TooWide {
        /// Block length in bits.
        len: usize,
        /// Widest supported length.
        max: usize,
    },

    /// Field parameters that do not describe a usable GF(2^n).
    #[error("invalid field: degree {degree}, reduction constant {reduction:#x}")]
    InvalidField {
        /// Requested degree.
        degree: u32,
        /// Requested reduction constant.
        reduction: u32,
    },

    /// Field operand whose length is not the field degree.
    #[error("field element must be {expected} bits, got {actual}")]
    FieldWidth {
        /// Field degree.
        expected: usize,
        /// Operand length.
        actual: usize,
    },

    /// Substitution returned a block of a different width than its input.
    #[error("substitution changed width from {expected} to {actual} bits")]
    SubstitutionWidth {
        /// Input segment length.
        expected: usize,
        /// Output length.
        actual: usize,
    },

    /// Byte table built from a slice that is not exactly 256 entries.
    #[error("byte table needs 256 entries, got {len}")]
    TableSize {
        /// Number of entries supplied.
        len: usize,
    },

    /// Byte table lookup with a block that is not 8 bits wide.
    #[error("byte table expects 8-bit input, got {len} bits")]
    TableInput {
        /// Input length in bits.
        len: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BlockError>;
