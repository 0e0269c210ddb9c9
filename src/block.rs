//! 128-bit block type used as PRG seed/output and interior-node state.
//!
//! The least-significant bit of byte 0 is the control bit (spec §3); the
//! remaining 127 bits are seed material.

use std::convert::TryFrom;
use std::ops::{BitXor, BitXorAssign};

pub const BLOCK_SIZE: usize = 16;

/// An opaque, endian-stable 128-bit value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Block([u8; BLOCK_SIZE]);

impl Block {
    pub const ZERO: Block = Block([0u8; BLOCK_SIZE]);

    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Block(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; BLOCK_SIZE] {
        self.0
    }

    /// The control bit: the least-significant bit of the block.
    pub fn control_bit(&self) -> bool {
        self.0[0] & 1 == 1
    }

    /// This block with its control bit cleared (the "seed" part, §4.2).
    pub fn seed_part(&self) -> Block {
        let mut out = self.0;
        out[0] &= !1;
        Block(out)
    }

    /// This block with its control bit forced to `bit`.
    pub fn with_control_bit(&self, bit: bool) -> Block {
        let mut out = self.0;
        if bit {
            out[0] |= 1;
        } else {
            out[0] &= !1;
        }
        Block(out)
    }

    pub fn random(rng: &mut impl rand::RngCore) -> Self {
        let mut bytes = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut bytes);
        Block(bytes)
    }

    /// Little-endian load, per the wire format (spec §6).
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, crate::error::Error> {
        <[u8; BLOCK_SIZE]>::try_from(bytes)
            .map(Block)
            .map_err(|_| crate::error::Error::transport("short block read", bytes.len()))
    }

    pub fn to_le_bytes(&self) -> [u8; BLOCK_SIZE] {
        self.0
    }
}

impl BitXor for Block {
    type Output = Block;

    fn bitxor(self, rhs: Block) -> Block {
        let mut out = self.0;
        for (a, b) in out.iter_mut().zip(rhs.0.iter()) {
            *a ^= b;
        }
        Block(out)
    }
}

impl BitXorAssign for Block {
    fn bitxor_assign(&mut self, rhs: Block) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a ^= b;
        }
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(any(test, feature = "testing"))]
use proptest::prelude::*;

#[cfg(any(test, feature = "testing"))]
impl Arbitrary for Block {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<u8>(), BLOCK_SIZE)
            .prop_map(|v| {
                let mut bytes = [0u8; BLOCK_SIZE];
                bytes.copy_from_slice(&v);
                Block(bytes)
            })
            .boxed()
    }
}
