//! Length-doubling PRG contract and its realizations (spec §4.1).

#[macro_use]
mod definition;
mod aes;
mod counter;

pub use aes::FixedKeyAesPrg;
pub use counter::CounterPrg;
pub use definition::{Prg, SecurePrg};
