//! Fixed-width binary blocks and the GF(2^8) arithmetic behind Rijndael.
//!
//! This crate provides:
//! - [`Block`], an immutable most-significant-bit-first bit vector with
//!   construction, conversion, segmentation, XOR and shift operations.
//! - [`Field`], GF(2^n) multiplication with an explicit reduction constant,
//!   defaulting to the AES polynomial `x^8 + x^4 + x^3 + x + 1`.
//! - [`g`], the key-schedule step combining segment rotation, a caller
//!   supplied [`Substitution`] and a round constant.
//! - A text/byte [`Codec`] that packs input into fixed-size blocks.
//!
//! Arithmetic is bit-by-bit and favours clarity over speed; it is not
//! constant-time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod codec;
mod error;
mod field;
mod schedule;

pub use crate::block::{Block, MAX_DECIMAL_BITS};
pub use crate::codec::{
    blocks_to_bytes, blocks_to_text, bytes_to_blocks, text_to_blocks, Codec, Trailing,
    DEFAULT_BLOCK_BYTES,
};
pub use crate::error::{BlockError, Result};
pub use crate::field::Field;
pub use crate::schedule::{g, ByteTable, Identity, Substitution, WORD_SEGMENTS};
