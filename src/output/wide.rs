//! A user output type wider than one block: its leaf bucket spans `N`
//! consecutive blocks, zipped together pairwise (spec §4.3, SPEC_FULL §B.4,
//! grounded on `examples/original_source/include/dpf/zip_iterable.hpp`).

use super::definition::LeafArithmetic;
use crate::block::Block;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wide<const N: usize>(pub [Block; N]);

impl<const N: usize> LeafArithmetic for Wide<N> {
    const OUTPUTS_PER_LEAF: usize = 1;
    const LEAF_BLOCKS: usize = N;

    fn zero() -> Self {
        Wide([Block::ZERO; N])
    }

    fn combine(&self, other: &Self) -> Self {
        let mut out = [Block::ZERO; N];
        for ((o, a), b) in out.iter_mut().zip(self.0.iter()).zip(other.0.iter()) {
            *o = *a ^ *b;
        }
        Wide(out)
    }

    fn combine_inverse(&self, other: &Self) -> Self {
        self.combine(other)
    }

    fn pack_in_leaf(values: &[Self]) -> Vec<Block> {
        debug_assert_eq!(values.len(), 1);
        values[0].0.to_vec()
    }

    fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self> {
        debug_assert_eq!(blocks.len(), N);
        let mut arr = [Block::ZERO; N];
        arr.copy_from_slice(blocks);
        vec![Wide(arr)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_combine_is_elementwise_xor() {
        let a = Wide([Block::from_bytes([0xF0u8; 16]), Block::from_bytes([0x0Fu8; 16])]);
        let b = Wide([Block::from_bytes([0x0Fu8; 16]), Block::from_bytes([0xF0u8; 16])]);
        let combined = a.combine(&b);
        assert_eq!(combined.0[0], Block::from_bytes([0xFFu8; 16]));
        assert_eq!(combined.0[1], Block::from_bytes([0xFFu8; 16]));
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let value = Wide([Block::from_bytes([1u8; 16]), Block::from_bytes([2u8; 16]), Block::from_bytes([3u8; 16])]);
        let blocks = Wide::<3>::pack_in_leaf(std::slice::from_ref(&value));
        assert_eq!(Wide::<3>::unpack_from_leaf(&blocks), vec![value]);
    }
}
