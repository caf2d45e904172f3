//! Fixed-length bit blocks stored most significant bit first.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BlockError, Result};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Widest block accepted by [`Block::to_decimal`].
pub const MAX_DECIMAL_BITS: usize = u64::BITS as usize;

/// Immutable bit vector of fixed length, index 0 holding the most significant bit.
///
/// Every constructor copies its input and every operation returns a new
/// block, so two blocks never share storage.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    bits: Box<[bool]>,
}

impl Block {
    /// Returns an all-zero block of `len` bits.
    pub fn zero(len: usize) -> Self {
        Self {
            bits: vec![false; len].into_boxed_slice(),
        }
    }

    /// Builds a `len`-bit block holding `value`, truncated or zero-padded on the left.
    pub fn from_value(len: usize, value: u64) -> Self {
        let bits = (0..len)
            .map(|index| {
                let power = len - 1 - index;
                power < MAX_DECIMAL_BITS && (value >> power) & 1 == 1
            })
            .collect();
        Self { bits }
    }

    /// Parses a string of `0` and `1` characters.
    pub fn from_bit_string(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(BlockError::InvalidBitChar { ch, position }),
            })
            .collect::<Result<Box<[bool]>>>()?;
        Ok(Self { bits })
    }

    /// Parses a bit string, reading every character other than `1` as a zero bit.
    pub fn from_bit_string_lossy(s: &str) -> Self {
        Self {
            bits: s.chars().map(|ch| ch == '1').collect(),
        }
    }

    /// Copies an existing bit sequence.
    pub fn from_bits(bits: &[bool]) -> Self {
        Self { bits: bits.into() }
    }

    /// Concatenates `parts` in order.
    pub fn from_concatenation<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Block>,
    {
        Self {
            bits: parts
                .into_iter()
                .flat_map(|part| part.bits.iter().copied())
                .collect(),
        }
    }

    /// Unpacks bytes, eight bits per byte, most significant bit first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: bytes
                .iter()
                .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
                .collect(),
        }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true for a zero-length block.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Reads the bit at `index`, counting from the most significant end.
    #[inline]
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Exposes the bits, most significant first.
    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns true if no bit is set.
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|bit| !bit)
    }

    /// Interprets the block as a big-endian unsigned integer.
    ///
    /// Blocks wider than 64 bits are rejected instead of wrapping.
    pub fn to_decimal(&self) -> Result<u64> {
        if self.len() > MAX_DECIMAL_BITS {
            return Err(BlockError::TooWide {
                len: self.len(),
                max: MAX_DECIMAL_BITS,
            });
        }
        Ok(self
            .bits
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit)))
    }

    /// Renders the block as uppercase hexadecimal, one digit per 4 bits.
    pub fn to_hex_string(&self) -> Result<String> {
        if self.len() % 4 != 0 {
            return Err(BlockError::NotNibbleAligned { len: self.len() });
        }
        Ok(self
            .bits
            .chunks_exact(4)
            .map(|nibble| char::from(HEX_DIGITS[usize::from(pack(nibble))]))
            .collect())
    }

    /// Renders the block as `0`/`1` characters.
    pub fn to_bit_string(&self) -> String {
        self.bits
            .iter()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }

    /// Packs the block into bytes, most significant bit first.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.len() % 8 != 0 {
            return Err(BlockError::NotByteAligned { len: self.len() });
        }
        Ok(self.bits.chunks_exact(8).map(pack).collect())
    }

    /// Copies segment `index` out of `number_segments` equal parts.
    pub fn segment(&self, number_segments: usize, index: usize) -> Result<Block> {
        if number_segments == 0 {
            return Err(BlockError::ZeroSegments);
        }
        if self.len() % number_segments != 0 {
            return Err(BlockError::NotDivisible {
                len: self.len(),
                segments: number_segments,
            });
        }
        if index >= number_segments {
            return Err(BlockError::SegmentOutOfRange {
                index,
                segments: number_segments,
            });
        }
        let segment_len = self.len() / number_segments;
        let start = index * segment_len;
        Ok(Self::from_bits(&self.bits[start..start + segment_len]))
    }

    /// Bitwise XOR of two blocks of equal length.
    pub fn xor(&self, other: &Block) -> Result<Block> {
        if self.len() != other.len() {
            return Err(BlockError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(Self {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| a ^ b)
                .collect(),
        })
    }

    /// Logical shift towards the most significant end, filling the last bit with zero.
    pub fn left_shift(&self) -> Block {
        Self {
            bits: self
                .bits
                .iter()
                .skip(1)
                .copied()
                .chain(core::iter::once(false))
                .take(self.len())
                .collect(),
        }
    }
}

/// Packs up to eight bits, most significant first.
fn pack(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
}

impl From<u8> for Block {
    fn from(value: u8) -> Self {
        Self::from_value(8, u64::from(value))
    }
}

impl FromStr for Block {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bit_string(s)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({})", self.to_bit_string())
    }
}
