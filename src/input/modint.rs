//! Modular-integer input type (spec §6): values in `0..modulus`.

use super::definition::InputType;
use crate::error::Error;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModInt {
    modulus: u64,
    value: u64,
}

impl ModInt {
    pub fn new(value: u64, modulus: u64) -> Result<Self, Error> {
        if modulus == 0 {
            return Err(Error::domain("modulus must be non-zero"));
        }
        if value >= modulus {
            return Err(Error::domain(format!(
                "value {} out of range for modulus {}",
                value, modulus
            )));
        }
        Ok(ModInt { modulus, value })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl PartialOrd for ModInt {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModInt {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl InputType for ModInt {
    fn bit_length(&self) -> u32 {
        (64 - (self.modulus - 1).leading_zeros()).max(1)
    }

    fn to_bits(&self) -> u64 {
        self.value
    }
}
