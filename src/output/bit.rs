//! The `bit` output type: one bit per slot, 128 slots per leaf block,
//! combined by XOR (spec §3, §4.3).

use super::definition::LeafArithmetic;
use crate::block::{Block, BLOCK_SIZE};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bit(pub bool);

impl Bit {
    pub const ZERO: Bit = Bit(false);
    pub const ONE: Bit = Bit(true);
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        Bit(b)
    }
}

impl LeafArithmetic for Bit {
    const OUTPUTS_PER_LEAF: usize = BLOCK_SIZE * 8;
    const LEAF_BLOCKS: usize = 1;

    fn zero() -> Self {
        Bit(false)
    }

    fn combine(&self, other: &Self) -> Self {
        Bit(self.0 ^ other.0)
    }

    fn combine_inverse(&self, other: &Self) -> Self {
        self.combine(other)
    }

    fn pack_in_leaf(values: &[Self]) -> Vec<Block> {
        debug_assert_eq!(values.len(), Self::OUTPUTS_PER_LEAF);
        let mut bytes = [0u8; BLOCK_SIZE];
        for (i, v) in values.iter().enumerate() {
            if v.0 {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        vec![Block::from_bytes(bytes)]
    }

    fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self> {
        debug_assert_eq!(blocks.len(), Self::LEAF_BLOCKS);
        let bytes = blocks[0].as_bytes();
        (0..Self::OUTPUTS_PER_LEAF)
            .map(|i| Bit((bytes[i / 8] >> (i % 8)) & 1 == 1))
            .collect()
    }
}
