//! A non-secure "counter" PRG that returns the seed unchanged, exposed so
//! correctness tests can substitute it via a generic parameter (spec §4.1).
//! It intentionally does not implement [`SecurePrg`], so it cannot be used
//! to instantiate a key generator.

use super::definition::Prg;
use crate::block::Block;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterPrg;

impl Prg for CounterPrg {
    fn eval(&self, seed: &Block, _position: u64) -> Block {
        *seed
    }

    fn eval01(&self, seed: &Block) -> (Block, Block) {
        (*seed, *seed)
    }
}

#[cfg(any(test, feature = "testing"))]
use proptest::prelude::*;

#[cfg(any(test, feature = "testing"))]
impl Arbitrary for CounterPrg {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        Just(CounterPrg).boxed()
    }
}
