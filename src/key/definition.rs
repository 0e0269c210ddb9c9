//! Key data model (spec §3): everything one party holds after generation.
//!
//! A `Key<T>` carries the GGM-tree root seed, the shared interior correction
//! words and advice bits, the leaf correction word for this key's output
//! column, and — only when the column or the input was generated as a
//! wildcard — the correlated randomness `vernalize` consumes to bind a real
//! value post-generation.

use crate::block::Block;
use crate::node::Advice;
use crate::output::LeafArithmetic;

/// One party's share of the correlated randomness a wildcard output column
/// needs (spec §4.7, §3: "an additional Beaver correlation tuple"). Shaped as
/// `(alpha, alpha combine partial)` rather than a multiplication triple,
/// since `LeafArithmetic::combine` is a group operation, not a ring product —
/// see DESIGN.md for the derivation.
#[derive(Clone, Debug, PartialEq)]
pub struct WildcardOutputCorrelation<T> {
    pub(crate) slot: usize,
    pub(crate) alpha_share: T,
    pub(crate) combined_share: T,
}

/// One party's key for a single output column (spec §3).
#[derive(Clone, Debug)]
pub struct Key<T: LeafArithmetic> {
    pub(crate) root: Block,
    pub(crate) correction_words: Vec<Block>,
    pub(crate) advice: Vec<Advice>,
    pub(crate) depth: u32,
    pub(crate) domain_bits: u32,
    pub(crate) leaf_correction: Vec<T>,
    pub(crate) wildcard_output: Option<WildcardOutputCorrelation<T>>,
    pub(crate) input_offset_share: Option<u64>,
    pub(crate) bound_input_offset: Option<u64>,
    /// `true` for the first key `key::generator::gen` returns, `false` for
    /// the second (spec §8 invariant 1). Evaluation negates party 1's final
    /// leaf output so that two-party reconstruction is a signed sum rather
    /// than a plain one — see `eval::unpack_leaf`.
    pub(crate) is_party_zero: bool,
}

impl<T: LeafArithmetic> Key<T> {
    /// Number of interior levels (root to the level above the leaves).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// `ceil(log2(|domain|))`, the bit width `x` is interpreted at.
    pub fn domain_bits(&self) -> u32 {
        self.domain_bits
    }

    pub fn root(&self) -> Block {
        self.root
    }

    pub fn correction_words(&self) -> &[Block] {
        &self.correction_words
    }

    pub fn advice(&self) -> &[Advice] {
        &self.advice
    }

    pub fn leaf_correction(&self) -> &[T] {
        &self.leaf_correction
    }

    /// This key's orientation within its pair (spec §8 invariant 1).
    pub fn is_party_zero(&self) -> bool {
        self.is_party_zero
    }

    /// True until `vernalize::bind_output` has consumed the correlation and
    /// written the real leaf correction word.
    pub fn is_output_wildcard_pending(&self) -> bool {
        self.wildcard_output.is_some()
    }

    /// True until `vernalize::bind_input` has reconstructed and stored the
    /// offset.
    pub fn is_input_wildcard_pending(&self) -> bool {
        self.input_offset_share.is_some() && self.bound_input_offset.is_none()
    }

    /// Neither wildcard remains unbound; the key may be evaluated.
    pub fn is_ready(&self) -> bool {
        !self.is_output_wildcard_pending() && !self.is_input_wildcard_pending()
    }

    /// The input an evaluator should actually walk the tree with: `x` itself
    /// for a fixed-input key, or `x` shifted by the bound offset for a
    /// formerly-wildcard input (spec §4.7).
    pub fn effective_input(&self, x: u64) -> u64 {
        match self.bound_input_offset {
            Some(offset) => x ^ offset,
            None => x,
        }
    }

    /// This key's pending output correlation, for `vernalize::OutputBindMachine`.
    pub(crate) fn wildcard_output(&self) -> Option<&WildcardOutputCorrelation<T>> {
        self.wildcard_output.as_ref()
    }

    /// This key's pending input-offset share, for `vernalize::InputBindMachine`.
    pub(crate) fn input_offset_share(&self) -> Option<u64> {
        self.input_offset_share
    }

    /// Called once `vernalize::InputBindMachine` reconstructs the offset
    /// (spec §4.7): stores it and clears the pending state.
    pub fn apply_bound_input_offset(&mut self, offset: u64) {
        self.bound_input_offset = Some(offset);
        self.input_offset_share = None;
    }

    /// Called once `vernalize::OutputBindMachine` reconstructs the leaf
    /// correction word for the wildcard column's slot (spec §4.7): writes it
    /// into the key and clears the pending correlation.
    pub fn apply_wildcard_output(&mut self, slot: usize, value: T) {
        debug_assert!(slot < self.leaf_correction.len());
        self.leaf_correction[slot] = value;
        self.wildcard_output = None;
    }
}
