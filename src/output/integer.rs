//! Fixed-width modular integer output lanes, combined by wrapping addition
//! (spec §3, §4.3: "Integer / fixed-point / SIMD-packed integer lane:
//! combine by element-wise modular addition and subtraction").

use super::definition::LeafArithmetic;
use crate::block::{Block, BLOCK_SIZE};

macro_rules! int_output {
    ($name:ident, $inner:ty) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        pub struct $name(pub $inner);

        impl From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl LeafArithmetic for $name {
            const OUTPUTS_PER_LEAF: usize = BLOCK_SIZE / std::mem::size_of::<$inner>();
            const LEAF_BLOCKS: usize = 1;

            fn zero() -> Self {
                $name(0)
            }

            fn combine(&self, other: &Self) -> Self {
                $name(self.0.wrapping_add(other.0))
            }

            fn combine_inverse(&self, other: &Self) -> Self {
                $name(self.0.wrapping_sub(other.0))
            }

            fn pack_in_leaf(values: &[Self]) -> Vec<Block> {
                debug_assert_eq!(values.len(), Self::OUTPUTS_PER_LEAF);
                let mut bytes = [0u8; BLOCK_SIZE];
                let width = std::mem::size_of::<$inner>();
                for (i, v) in values.iter().enumerate() {
                    let le = v.0.to_le_bytes();
                    bytes[i * width..(i + 1) * width].copy_from_slice(&le);
                }
                vec![Block::from_bytes(bytes)]
            }

            fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self> {
                debug_assert_eq!(blocks.len(), Self::LEAF_BLOCKS);
                let bytes = blocks[0].as_bytes();
                let width = std::mem::size_of::<$inner>();
                (0..Self::OUTPUTS_PER_LEAF)
                    .map(|i| {
                        let mut buf = [0u8; std::mem::size_of::<$inner>()];
                        buf.copy_from_slice(&bytes[i * width..(i + 1) * width]);
                        $name(<$inner>::from_le_bytes(buf))
                    })
                    .collect()
            }
        }
    };
}

int_output!(Int8, u8);
int_output!(Int16, u16);
int_output!(Int32, u32);
int_output!(Int64, u64);
int_output!(Int128, u128);
