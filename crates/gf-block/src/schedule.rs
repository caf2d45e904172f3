//! The Rijndael key-schedule `g` step and the substitution capability it uses.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use tracing::trace;

use crate::block::Block;
use crate::error::{BlockError, Result};

/// Number of segments a key-schedule word is split into.
pub const WORD_SEGMENTS: usize = 4;

/// A pure block-to-block substitution, such as an S-box.
pub trait Substitution {
    /// Maps one segment to its substitute.
    fn substitute(&self, input: &Block) -> Result<Block>;
}

impl<F> Substitution for F
where
    F: Fn(&Block) -> Result<Block>,
{
    fn substitute(&self, input: &Block) -> Result<Block> {
        self(input)
    }
}

/// Substitution that returns its input unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl Substitution for Identity {
    fn substitute(&self, input: &Block) -> Result<Block> {
        Ok(input.clone())
    }
}

/// 256-entry byte lookup table applied to 8-bit segments.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteTable {
    #[serde(with = "BigArray")]
    entries: [u8; 256],
}

impl ByteTable {
    /// Wraps a full lookup table.
    pub const fn new(entries: [u8; 256]) -> Self {
        Self { entries }
    }

    /// Builds a table from a slice that must hold exactly 256 entries.
    pub fn from_slice(entries: &[u8]) -> Result<Self> {
        let entries: [u8; 256] = entries
            .try_into()
            .map_err(|_| BlockError::TableSize { len: entries.len() })?;
        Ok(Self { entries })
    }

    /// Looks up a single byte.
    #[inline]
    pub fn lookup(&self, value: u8) -> u8 {
        self.entries[usize::from(value)]
    }
}

impl From<[u8; 256]> for ByteTable {
    fn from(entries: [u8; 256]) -> Self {
        Self::new(entries)
    }
}

impl fmt::Debug for ByteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteTable").finish_non_exhaustive()
    }
}

impl Substitution for ByteTable {
    fn substitute(&self, input: &Block) -> Result<Block> {
        if input.len() != 8 {
            return Err(BlockError::TableInput { len: input.len() });
        }
        let value = input.to_decimal()? as u8;
        Ok(Block::from(self.lookup(value)))
    }
}

/// Applies the key-schedule `g` step to `word`.
///
/// The word is split into four segments, rotated left by one segment, each
/// segment is substituted, and the reassembled word is XORed with
/// `round_constant`.
pub fn g<S>(word: &Block, substitution: &S, round_constant: &Block) -> Result<Block>
where
    S: Substitution + ?Sized,
{
    if word.len() != round_constant.len() {
        return Err(BlockError::LengthMismatch {
            left: word.len(),
            right: round_constant.len(),
        });
    }

    let mut substituted = Vec::with_capacity(WORD_SEGMENTS);
    for index in 0..WORD_SEGMENTS {
        let segment = word.segment(WORD_SEGMENTS, (index + 1) % WORD_SEGMENTS)?;
        let output = substitution.substitute(&segment)?;
        if output.len() != segment.len() {
            return Err(BlockError::SubstitutionWidth {
                expected: segment.len(),
                actual: output.len(),
            });
        }
        substituted.push(output);
    }

    let rotated = Block::from_concatenation(&substituted);
    trace!(word = %word, substituted = %rotated, "g step");
    rotated.xor(round_constant)
}
