//! Fixed-point output type (spec §3, §6): a two's-complement `i64` with a
//! compile-time fractional-bit count, matching the original `fixedpoint`
//! template parameters (`examples/original_source/include/dpf/fixedpoint.hpp`,
//! SPEC_FULL §B.3).

use super::definition::LeafArithmetic;
use crate::block::{Block, BLOCK_SIZE};

/// `FRAC_BITS` fractional bits out of 64; the raw `i64` is the fixed-point
/// value scaled by `2^FRAC_BITS`. Arithmetic (add/sub) is plain two's
/// complement wraparound on the raw representation, which is exactly what
/// addition/subtraction of fixed-point values with the same scale requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FixedPoint<const FRAC_BITS: u32>(pub i64);

impl<const FRAC_BITS: u32> FixedPoint<FRAC_BITS> {
    pub fn from_raw(raw: i64) -> Self {
        FixedPoint(raw)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1u64 << FRAC_BITS) as f64
    }

    pub fn from_f64(value: f64) -> Self {
        FixedPoint((value * (1u64 << FRAC_BITS) as f64).round() as i64)
    }
}

impl<const FRAC_BITS: u32> LeafArithmetic for FixedPoint<FRAC_BITS> {
    const OUTPUTS_PER_LEAF: usize = BLOCK_SIZE / std::mem::size_of::<i64>();
    const LEAF_BLOCKS: usize = 1;

    fn zero() -> Self {
        FixedPoint(0)
    }

    fn combine(&self, other: &Self) -> Self {
        FixedPoint(self.0.wrapping_add(other.0))
    }

    fn combine_inverse(&self, other: &Self) -> Self {
        FixedPoint(self.0.wrapping_sub(other.0))
    }

    fn pack_in_leaf(values: &[Self]) -> Vec<Block> {
        debug_assert_eq!(values.len(), Self::OUTPUTS_PER_LEAF);
        let mut bytes = [0u8; BLOCK_SIZE];
        for (i, v) in values.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&v.0.to_le_bytes());
        }
        vec![Block::from_bytes(bytes)]
    }

    fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self> {
        debug_assert_eq!(blocks.len(), Self::LEAF_BLOCKS);
        let bytes = blocks[0].as_bytes();
        (0..Self::OUTPUTS_PER_LEAF)
            .map(|i| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
                FixedPoint(i64::from_le_bytes(buf))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_roundtrip_is_approximate() {
        let fp = FixedPoint::<16>::from_f64(3.25);
        assert!((fp.to_f64() - 3.25).abs() < 1e-4);
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let values = vec![FixedPoint::<8>::from_raw(100), FixedPoint::<8>::from_raw(-42)];
        let blocks = FixedPoint::<8>::pack_in_leaf(&values);
        assert_eq!(FixedPoint::<8>::unpack_from_leaf(&blocks), values);
    }
}
