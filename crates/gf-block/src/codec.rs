//! Conversion between text or bytes and fixed-size blocks.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::block::Block;
use crate::error::{BlockError, Result};

/// Block size used by [`Codec::default`]: one AES block.
pub const DEFAULT_BLOCK_BYTES: usize = 16;

/// What to do with input that does not fill a final block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trailing {
    /// Fail with [`BlockError::Truncated`].
    #[default]
    Reject,
    /// Discard the leftover bytes and log a warning.
    Drop,
}

/// Chunking configuration for text and byte input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codec {
    /// Bytes per block.
    pub block_bytes: usize,
    /// Handling of a partial final chunk.
    pub trailing: Trailing,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_BYTES)
    }
}

impl Codec {
    /// Creates a codec that rejects partial final chunks.
    pub const fn new(block_bytes: usize) -> Self {
        Self {
            block_bytes,
            trailing: Trailing::Reject,
        }
    }

    /// Returns a copy using the given trailing-input policy.
    pub const fn with_trailing(mut self, trailing: Trailing) -> Self {
        self.trailing = trailing;
        self
    }

    /// Splits `bytes` into blocks of `block_bytes * 8` bits.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<Vec<Block>> {
        if self.block_bytes == 0 {
            return Err(BlockError::ZeroBlockSize);
        }

        let chunks = bytes.chunks_exact(self.block_bytes);
        let remainder = chunks.remainder().len();
        if remainder != 0 {
            match self.trailing {
                Trailing::Reject => {
                    return Err(BlockError::Truncated {
                        remainder,
                        block_bytes: self.block_bytes,
                    })
                }
                Trailing::Drop => warn!(
                    remainder,
                    block_bytes = self.block_bytes,
                    "dropping trailing bytes that do not fill a block"
                ),
            }
        }

        let blocks: Vec<Block> = chunks.map(Block::from_bytes).collect();
        debug!(
            blocks = blocks.len(),
            block_bytes = self.block_bytes,
            "encoded input"
        );
        Ok(blocks)
    }

    /// Splits `text` into blocks, one byte per character.
    ///
    /// Every character must have a code point below 256.
    pub fn encode_text(&self, text: &str) -> Result<Vec<Block>> {
        let bytes = text
            .chars()
            .map(|ch| u8::try_from(ch).map_err(|_| BlockError::UnrepresentableChar { ch }))
            .collect::<Result<Vec<u8>>>()?;
        self.encode_bytes(&bytes)
    }
}

/// Encodes `text` into blocks of `block_bytes` characters, rejecting a partial final chunk.
pub fn text_to_blocks(text: &str, block_bytes: usize) -> Result<Vec<Block>> {
    Codec::new(block_bytes).encode_text(text)
}

/// Encodes `bytes` into blocks of `block_bytes` bytes, rejecting a partial final chunk.
pub fn bytes_to_blocks(bytes: &[u8], block_bytes: usize) -> Result<Vec<Block>> {
    Codec::new(block_bytes).encode_bytes(bytes)
}

/// Concatenates the bytes of every block in order.
pub fn blocks_to_bytes(blocks: &[Block]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(blocks.iter().map(|block| block.len() / 8).sum());
    for block in blocks {
        out.extend(block.to_bytes()?);
    }
    Ok(out)
}

/// Decodes blocks back to text, one character per byte.
pub fn blocks_to_text(blocks: &[Block]) -> Result<String> {
    Ok(blocks_to_bytes(blocks)?
        .into_iter()
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn characters_become_msb_first_bytes() {
        let blocks = text_to_blocks("Ab", 2).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].to_bit_string(), "0100000101100010");
    }

    #[test]
    fn one_block_per_chunk() {
        let blocks = text_to_blocks("abcdefgh", 4).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 32);
        assert_eq!(blocks[1].to_hex_string().unwrap(), "65666768");
    }

    #[test]
    fn text_roundtrip() {
        let mut rng = ChaCha20Rng::from_seed([50u8; 32]);
        for block_bytes in [1usize, 3, 16] {
            let text: String = (0..block_bytes * 5)
                .map(|_| char::from(rng.gen::<u8>()))
                .collect();
            let blocks = text_to_blocks(&text, block_bytes).unwrap();
            assert_eq!(blocks.len(), 5);
            assert_eq!(blocks_to_text(&blocks).unwrap(), text);
        }
    }

    #[test]
    fn latin1_characters_are_accepted() {
        let blocks = text_to_blocks("café", 4).unwrap();
        assert_eq!(blocks_to_text(&blocks).unwrap(), "café");
        assert_eq!(blocks[0].segment(4, 3).unwrap(), Block::from(0xe9));
    }

    #[test]
    fn partial_chunk_is_rejected_by_default() {
        assert_eq!(
            text_to_blocks("hello", 4),
            Err(BlockError::Truncated {
                remainder: 1,
                block_bytes: 4
            })
        );
    }

    #[test]
    fn partial_chunk_can_be_dropped() {
        let codec = Codec::new(4).with_trailing(Trailing::Drop);
        let blocks = codec.encode_text("hello").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks_to_text(&blocks).unwrap(), "hell");
        assert!(codec.encode_text("abc").unwrap().is_empty());
    }

    #[test]
    fn wide_characters_are_rejected() {
        assert_eq!(
            text_to_blocks("a€", 2),
            Err(BlockError::UnrepresentableChar { ch: '€' })
        );
    }

    #[test]
    fn zero_block_size_is_rejected() {
        assert_eq!(bytes_to_blocks(b"ab", 0), Err(BlockError::ZeroBlockSize));
    }

    #[test]
    fn empty_input_gives_no_blocks() {
        assert!(text_to_blocks("", 16).unwrap().is_empty());
        assert_eq!(blocks_to_text(&[]).unwrap(), "");
    }

    #[test]
    fn decoding_requires_byte_aligned_blocks() {
        let blocks = [Block::from(0x41), Block::zero(4)];
        assert_eq!(
            blocks_to_text(&blocks),
            Err(BlockError::NotByteAligned { len: 4 })
        );
    }

    #[test]
    fn byte_roundtrip() {
        let data = *b"sixteen byte msgsixteen byte msg";
        let blocks = Codec::default().encode_bytes(&data).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 128);
        assert_eq!(blocks_to_bytes(&blocks).unwrap(), data);
    }
}
