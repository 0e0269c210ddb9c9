//! Leaf layer (spec §4.3): bucket arithmetic and leaf-correction-word
//! derivation shared by the key generator and every evaluation engine.

use crate::block::Block;
use crate::output::LeafArithmetic;

/// The leaf bucket (`x / outputs_per_leaf`) and in-bucket slot (`x %
/// outputs_per_leaf`) for a canonical input `x`.
pub fn bucket_and_slot<T: LeafArithmetic>(x: u64) -> (u64, usize) {
    let per = T::OUTPUTS_PER_LEAF as u64;
    (x / per, (x % per) as usize)
}

/// Derives the leaf correction word(s) for a non-wildcard output column
/// (spec §4.3, §4.4): chosen so that reconstructing the two parties' corrected
/// leaf blocks (party 0's value plus party 1's *negated* value, spec §8
/// invariant 1) yields `y` in `slot` and the group zero everywhere else.
///
/// `party0_leaf` and `party1_leaf` are each party's *uncorrected* leaf value
/// (all slots zero, since leaves are built from fresh PRG output which is
/// itself pseudorandom — the generator only ever calls this with the
/// corresponding leaf already reduced to "what party 0/1 would see before
/// correction", see `key::generator`).
///
/// `party0_owns_correction` says which of the two keys' control bit ends up
/// set at this leaf (exactly one does, by the GGM-tree invariant); the
/// correction word's sign flips with it, since it is added to whichever
/// party's (already sign-adjusted) output receives it.
pub fn derive_leaf_correction<T: LeafArithmetic>(
    party0_leaf: &[T],
    party1_leaf: &[T],
    slot: usize,
    y: &T,
    party0_owns_correction: bool,
) -> Vec<T> {
    debug_assert_eq!(party0_leaf.len(), T::OUTPUTS_PER_LEAF);
    debug_assert_eq!(party1_leaf.len(), T::OUTPUTS_PER_LEAF);
    let mut lcw = Vec::with_capacity(T::OUTPUTS_PER_LEAF);
    for i in 0..T::OUTPUTS_PER_LEAF {
        let want = if i == slot { y.clone() } else { T::zero() };
        // Reconstruction is party0_leaf[i] combine (lcw[i] applied to
        // whichever party owns it) combine party1_leaf[i].negate() (spec §8
        // invariant 1's signed sum), so the owning party's share of `want`
        // is `want - (party0_leaf[i] - party1_leaf[i])`, negated again if
        // party 1 is the one who actually receives the correction.
        let diff = party0_leaf[i].combine_inverse(&party1_leaf[i]);
        let base = want.combine_inverse(&diff);
        lcw.push(if party0_owns_correction { base } else { base.negate() });
    }
    lcw
}

/// Applies a leaf correction word to one party's raw leaf output, as the
/// evaluation engines do at the final level (spec §4.3).
pub fn apply_leaf_correction<T: LeafArithmetic>(raw: &mut [T], lcw: &[T]) {
    debug_assert_eq!(raw.len(), lcw.len());
    for (r, c) in raw.iter_mut().zip(lcw.iter()) {
        *r = r.combine(c);
    }
}

/// Zips `N` leaf buckets' worth of consecutive blocks together, for output
/// types wider than one block (spec §4.3; SPEC_FULL §B.4, grounded on
/// `examples/original_source/include/dpf/zip_iterable.hpp`).
pub struct ZipBlocks<'a> {
    chunks: std::slice::Chunks<'a, Block>,
}

impl<'a> ZipBlocks<'a> {
    pub fn new(blocks: &'a [Block], leaf_blocks: usize) -> Self {
        ZipBlocks {
            chunks: blocks.chunks(leaf_blocks),
        }
    }
}

impl<'a> Iterator for ZipBlocks<'a> {
    type Item = &'a [Block];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }
}
