//! Type-parametric output algebra (spec §3, §4.3).

pub mod bit;
pub mod buffer;
pub mod definition;
pub mod fixedpoint;
pub mod integer;
pub mod wide;
pub mod xor;

pub use bit::Bit;
pub use buffer::{BitBuffer, OutputSink, VecBuffer};
pub use definition::{combine_in_place, sample_leaf_value, LeafArithmetic};
pub use fixedpoint::FixedPoint;
pub use integer::{Int128, Int16, Int32, Int64, Int8};
pub use wide::Wide;
pub use xor::XorBlock;
