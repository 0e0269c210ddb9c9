//! An input type whose wildcard offset is applied by XOR rather than modular
//! subtraction (spec §4.7: "x ⊕ offset" for XOR-combined domains). Wraps any
//! other `InputType` with the same bit length, transparently.

use super::definition::InputType;

#[derive(Clone, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct XorWrapper<T>(pub T);

impl<T: InputType> InputType for XorWrapper<T> {
    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }

    fn to_bits(&self) -> u64 {
        self.0.to_bits()
    }
}

impl<T: InputType> XorWrapper<T> {
    /// Combines this input with an XOR offset (spec §4.7 wildcard-input
    /// flow), producing the shifted canonical value. Caller reconstructs a
    /// concrete `T` via whatever constructor `T` exposes; this only handles
    /// the bit-level arithmetic common to every XOR-combined domain.
    pub fn xor_bits(&self, offset_bits: u64) -> u64 {
        self.0.to_bits() ^ (offset_bits & ((1u64 << self.bit_length()) - 1).max(1))
    }
}
