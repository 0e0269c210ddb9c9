//! Memoizer layouts (spec §4.5): scratch state reused across evaluation
//! calls to amortize PRG work against access patterns.

pub mod interval;
pub mod path;
pub mod sequence;

pub use path::PathMemoizer;
pub use sequence::{InPlaceReversingMemoizer, Recipe, Step};
