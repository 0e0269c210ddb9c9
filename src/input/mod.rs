//! Domain-specific input types (spec §6).

#[macro_use]
pub mod definition;
pub mod bitstring;
pub mod keyword;
pub mod modint;
pub mod xor_wrapper;

pub use bitstring::Bitstring;
pub use definition::{EffectiveBits, InputType};
pub use keyword::{Keyword, KeywordIntMap};
pub use modint::ModInt;
pub use xor_wrapper::XorWrapper;
