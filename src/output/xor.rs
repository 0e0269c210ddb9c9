//! An opaque, block-sized output type combined by XOR (spec §3, §4.3:
//! "Bit / XOR-wrapped / fixed-size opaque: combine by XOR"). This is also
//! the shape any user-defined output type takes when it declares itself
//! XOR-valued rather than providing `+`/`-`.

use super::definition::LeafArithmetic;
use crate::block::Block;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct XorBlock(pub Block);

impl LeafArithmetic for XorBlock {
    const OUTPUTS_PER_LEAF: usize = 1;
    const LEAF_BLOCKS: usize = 1;

    fn zero() -> Self {
        XorBlock(Block::ZERO)
    }

    fn combine(&self, other: &Self) -> Self {
        XorBlock(self.0 ^ other.0)
    }

    fn combine_inverse(&self, other: &Self) -> Self {
        self.combine(other)
    }

    fn pack_in_leaf(values: &[Self]) -> Vec<Block> {
        debug_assert_eq!(values.len(), 1);
        vec![values[0].0]
    }

    fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self> {
        debug_assert_eq!(blocks.len(), 1);
        vec![XorBlock(blocks[0])]
    }
}
