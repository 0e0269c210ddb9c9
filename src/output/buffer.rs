//! Output buffers sized to an eval mode (spec §2, §4.5), with a `dpf::bit`
//! specialization backed by the packed bit-array instead of one `Bit` per
//! `Vec` slot.

use super::bit::Bit;
use super::definition::LeafArithmetic;
use crate::bitarray::BitArray;

/// Where an evaluation engine writes its outputs. `VecBuffer<T>` is the
/// general case; [`BitBuffer`] specializes `T = Bit` to a packed array so a
/// full-domain bit evaluation doesn't cost one byte per output bit.
pub trait OutputSink<T> {
    fn write_slot(&mut self, index: usize, value: T);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
pub struct VecBuffer<T>(pub Vec<T>);

impl<T: LeafArithmetic> VecBuffer<T> {
    pub fn new(len: usize) -> Self {
        VecBuffer(vec![T::zero(); len])
    }
}

impl<T> OutputSink<T> for VecBuffer<T> {
    fn write_slot(&mut self, index: usize, value: T) {
        self.0[index] = value;
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// The `dpf::bit` output-buffer specialization: a packed bit array instead
/// of `Vec<Bit>`.
#[derive(Clone, Debug)]
pub struct BitBuffer(pub BitArray);

impl BitBuffer {
    pub fn new(len: usize) -> Self {
        BitBuffer(BitArray::zeroed(len))
    }

    pub fn into_inner(self) -> BitArray {
        self.0
    }
}

impl OutputSink<Bit> for BitBuffer {
    fn write_slot(&mut self, index: usize, value: Bit) {
        if value.0 {
            self.0.set(index);
        } else {
            self.0.unset(index);
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
