//! Binary extension field arithmetic over [`Block`] elements.
//!
//! An element of GF(2^n) is an `n`-bit block whose bit 0 holds the `x^(n-1)`
//! coefficient and whose last bit holds the constant term. Reduction uses the
//! field's irreducible polynomial, stored without its leading `x^n` term.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::block::Block;
use crate::error::{BlockError, Result};

/// A GF(2^n) described by its degree and reduction constant.
///
/// The reduction constant is the irreducible polynomial minus `x^n`; for the
/// Rijndael field `x^8 + x^4 + x^3 + x + 1` it is `0x1b`. Irreducibility is
/// the caller's responsibility and is not verified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    degree: u32,
    reduction: u32,
}

impl Field {
    /// The AES field, `x^8 + x^4 + x^3 + x + 1`.
    pub const RIJNDAEL: Self = Self {
        degree: 8,
        reduction: 0x1b,
    };

    /// Largest supported degree.
    pub const MAX_DEGREE: u32 = 32;

    /// Creates a field of `degree` with the given reduction constant.
    pub fn new(degree: u32, reduction: u32) -> Result<Self> {
        let fits = matches!(reduction.checked_shr(degree), None | Some(0));
        if degree == 0 || degree > Self::MAX_DEGREE || !fits {
            return Err(BlockError::InvalidField { degree, reduction });
        }
        Ok(Self { degree, reduction })
    }

    /// Width of a field element in bits.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Reduction constant (the modulus without its `x^n` term).
    #[inline]
    pub fn reduction(&self) -> u32 {
        self.reduction
    }

    /// Returns the additive identity.
    pub fn zero(&self) -> Block {
        Block::zero(self.width())
    }

    /// Returns the multiplicative identity.
    pub fn one(&self) -> Block {
        Block::from_value(self.width(), 1)
    }

    /// Multiplies `element` by `x` and reduces (xtime).
    pub fn xtime(&self, element: &Block) -> Result<Block> {
        self.check(element)?;
        let shifted = element.left_shift();
        if element.bit(0) == Some(true) {
            trace!(element = %element, "x^{} overflow, reducing", self.degree);
            return shifted.xor(&self.reduction_block());
        }
        Ok(shifted)
    }

    /// Multiplies two field elements by double-and-add.
    ///
    /// The coefficients of `rhs` are consumed from the constant term upward
    /// while `lhs` is repeatedly multiplied by `x`.
    pub fn multiply(&self, lhs: &Block, rhs: &Block) -> Result<Block> {
        self.check(lhs)?;
        self.check(rhs)?;

        let mut product = self.zero();
        let mut multiplier = lhs.clone();
        for &coefficient in rhs.bits().iter().rev() {
            if coefficient {
                product = product.xor(&multiplier)?;
            }
            multiplier = self.xtime(&multiplier)?;
        }
        Ok(product)
    }

    /// Adds two field elements (XOR).
    pub fn add(&self, lhs: &Block, rhs: &Block) -> Result<Block> {
        self.check(lhs)?;
        self.check(rhs)?;
        lhs.xor(rhs)
    }

    fn width(&self) -> usize {
        self.degree as usize
    }

    fn reduction_block(&self) -> Block {
        Block::from_value(self.width(), u64::from(self.reduction))
    }

    fn check(&self, element: &Block) -> Result<()> {
        if element.len() != self.width() {
            return Err(BlockError::FieldWidth {
                expected: self.width(),
                actual: element.len(),
            });
        }
        Ok(())
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::RIJNDAEL
    }
}

impl Block {
    /// Multiplies an 8-bit block by `x` in the Rijndael field.
    pub fn modular_multiply_by_x(&self) -> Result<Block> {
        Field::RIJNDAEL.xtime(self)
    }

    /// Multiplies two 8-bit blocks in the Rijndael field.
    pub fn modular_multiply(&self, other: &Block) -> Result<Block> {
        Field::RIJNDAEL.multiply(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn gmul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        for _ in 0..8 {
            if b & 1 != 0 {
                product ^= a;
            }
            let hi_bit_set = a & 0x80;
            a <<= 1;
            if hi_bit_set != 0 {
                a ^= 0x1b;
            }
            b >>= 1;
        }
        product
    }

    fn byte(block: &Block) -> u8 {
        block.to_decimal().unwrap() as u8
    }

    #[test]
    fn xtime_without_overflow_is_a_shift() {
        let result = Block::from(0x57).modular_multiply_by_x().unwrap();
        assert_eq!(result.to_bit_string(), "10101110");
        assert_eq!(byte(&result), 0xae);
    }

    #[test]
    fn xtime_chain_matches_fips197() {
        let mut element = Block::from(0x57);
        for expected in [0xae, 0x47, 0x8e, 0x07] {
            element = element.modular_multiply_by_x().unwrap();
            assert_eq!(byte(&element), expected);
        }
        assert_eq!(byte(&Block::from(0x80).modular_multiply_by_x().unwrap()), 0x1b);
    }

    #[test]
    fn multiply_matches_fips197_examples() {
        let a = Block::from(0x57);
        assert_eq!(byte(&a.modular_multiply(&Block::from(0x13)).unwrap()), 0xfe);
        assert_eq!(byte(&a.modular_multiply(&Block::from(0x83)).unwrap()), 0xc1);
    }

    #[test]
    fn one_is_identity_and_zero_annihilates() {
        let field = Field::RIJNDAEL;
        for value in 0u8..=255 {
            let a = Block::from(value);
            assert_eq!(a.modular_multiply(&Block::from_value(8, 1)).unwrap(), a);
            assert_eq!(field.multiply(&field.one(), &a).unwrap(), a);
            assert!(a.modular_multiply(&Block::from_value(8, 0)).unwrap().is_zero());
        }
    }

    #[test]
    fn multiply_matches_byte_reference() {
        let mut rng = ChaCha20Rng::from_seed([40u8; 32]);
        for _ in 0..512 {
            let a = rng.next_u32() as u8;
            let b = rng.next_u32() as u8;
            let product = Block::from(a).modular_multiply(&Block::from(b)).unwrap();
            assert_eq!(byte(&product), gmul(a, b), "{a:#04x} * {b:#04x}");
        }
    }

    #[test]
    fn multiply_is_commutative_and_distributive() {
        let field = Field::RIJNDAEL;
        let mut rng = ChaCha20Rng::from_seed([41u8; 32]);
        for _ in 0..64 {
            let a = Block::from(rng.next_u32() as u8);
            let b = Block::from(rng.next_u32() as u8);
            let c = Block::from(rng.next_u32() as u8);
            assert_eq!(
                field.multiply(&a, &b).unwrap(),
                field.multiply(&b, &a).unwrap()
            );
            let lhs = field.multiply(&a, &field.add(&b, &c).unwrap()).unwrap();
            let rhs = field
                .add(
                    &field.multiply(&a, &b).unwrap(),
                    &field.multiply(&a, &c).unwrap(),
                )
                .unwrap();
            assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn inverse_pair_multiplies_to_one() {
        // {53} and {ca} are inverses in the AES field.
        let product = Block::from(0x53).modular_multiply(&Block::from(0xca)).unwrap();
        assert_eq!(byte(&product), 0x01);
    }

    #[test]
    fn small_field_reduces_with_its_own_constant() {
        // GF(16) with x^4 + x + 1.
        let field = Field::new(4, 0x3).unwrap();
        let x_cubed = Block::from_value(4, 0b1000);
        assert_eq!(field.xtime(&x_cubed).unwrap(), Block::from_value(4, 0b0011));
        let x = Block::from_value(4, 0b0010);
        let x_squared = field.multiply(&x, &x).unwrap();
        assert_eq!(x_squared, Block::from_value(4, 0b0100));
        assert_eq!(
            field.multiply(&x_squared, &x_squared).unwrap(),
            Block::from_value(4, 0b0011)
        );
    }

    #[test]
    fn field_parameters_are_validated() {
        assert_eq!(Field::default(), Field::RIJNDAEL);
        assert!(Field::new(32, 0x8d).is_ok());
        assert_eq!(
            Field::new(0, 0),
            Err(BlockError::InvalidField {
                degree: 0,
                reduction: 0
            })
        );
        assert!(Field::new(33, 1).is_err());
        assert!(Field::new(8, 0x11b).is_err());
    }

    #[test]
    fn operands_must_match_field_width() {
        let wide = Block::zero(16);
        assert_eq!(
            wide.modular_multiply_by_x(),
            Err(BlockError::FieldWidth {
                expected: 8,
                actual: 16
            })
        );
        assert_eq!(
            Block::from(3).modular_multiply(&wide),
            Err(BlockError::FieldWidth {
                expected: 8,
                actual: 16
            })
        );
    }
}
