//! Type-parametric output algebra (spec §3, §4.3, §9): the leaf-arithmetic
//! trait each output type implements so leaf packing and combination can be
//! resolved at compile time rather than through dynamic dispatch.

use crate::block::Block;

/// Arithmetic and leaf-packing witness for one output type.
///
/// `combine` is the group operation two parties' shares are reconstructed
/// with: XOR for bit/XOR-wrapped/opaque types, modular addition for
/// integer/fixed-point lanes (spec §4.3). `OUTPUTS_PER_LEAF` values of this
/// type share one leaf bucket of `LEAF_BLOCKS` consecutive blocks.
pub trait LeafArithmetic: Sized + Clone + PartialEq + std::fmt::Debug {
    /// How many values of this type fit in one leaf bucket.
    const OUTPUTS_PER_LEAF: usize;

    /// How many consecutive blocks make up one leaf bucket. `1` unless the
    /// type is wider than a block (spec §4.3: "a leaf spans multiple
    /// consecutive blocks").
    const LEAF_BLOCKS: usize;

    /// The output group's zero.
    fn zero() -> Self;

    /// The group operation combining two parties' shares into the
    /// reconstructed value (XOR, or modular addition).
    fn combine(&self, other: &Self) -> Self;

    /// The inverse combine, used when deriving correction words (the
    /// generator needs `y - existing` as well as `a + b`).
    fn combine_inverse(&self, other: &Self) -> Self;

    /// The additive inverse under `combine`. Two-party reconstruction gives
    /// party 1's final leaf value the opposite sign of party 0's (spec §8
    /// invariant 1), which is what makes off-path buckets — where both
    /// parties compute the exact same corrected leaf value — cancel to zero
    /// instead of doubling. Self-inverse under XOR, this is already the
    /// identity, so the default is correct for every `LeafArithmetic` impl in
    /// this crate without an override.
    fn negate(&self) -> Self {
        Self::zero().combine_inverse(self)
    }

    /// Packs exactly `OUTPUTS_PER_LEAF` values (bucket order) into
    /// `LEAF_BLOCKS` consecutive blocks.
    fn pack_in_leaf(values: &[Self]) -> Vec<Block>;

    /// Unpacks `LEAF_BLOCKS` consecutive blocks into `OUTPUTS_PER_LEAF`
    /// values in bucket order. Inverse of `pack_in_leaf`.
    fn unpack_from_leaf(blocks: &[Block]) -> Vec<Self>;
}

/// Samples one pseudorandom value of `T`, used to generate fresh masks and
/// secret-sharing randomness (Beaver correlations, input-offset masks) —
/// grounded on the teacher's `Sampleable` pattern (`util.rs`), specialized
/// to draw from the same leaf-packing representation every output type
/// already provides.
pub fn sample_leaf_value<T: LeafArithmetic>(rng: &mut impl rand::RngCore) -> T {
    let blocks: Vec<Block> = (0..T::LEAF_BLOCKS).map(|_| Block::random(rng)).collect();
    T::unpack_from_leaf(&blocks)
        .into_iter()
        .next()
        .expect("OUTPUTS_PER_LEAF is always at least 1")
}

/// Combines two full leaf-bucket vectors slot-wise. Grounded on the XOR
/// accumulation pattern in `dpf::two_key::Construction::combine` (the
/// teacher's two-key DPF), generalized to the `LeafArithmetic::combine`
/// dispatch instead of being hardwired to XOR.
pub fn combine_in_place<T: LeafArithmetic>(acc: &mut [T], other: &[T]) {
    debug_assert_eq!(acc.len(), other.len());
    for (a, b) in acc.iter_mut().zip(other.iter()) {
        *a = a.combine(b);
    }
}
