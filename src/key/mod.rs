//! Key data model, generation, and wire serialization (spec §3, §4.4, §6).

pub mod definition;
pub mod generator;
pub mod params;
pub mod wire;

pub use definition::{Key, WildcardOutputCorrelation};
pub use generator::gen;
pub use params::DomainParams;
pub use wire::{read_key, write_key};
