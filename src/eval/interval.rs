//! Contiguous-range evaluation (spec §4.5.2): descends to the minimal
//! subtree covering `[from, to]`'s leaf buckets, then expands only that
//! subtree instead of the whole domain.
//!
//! Contiguity in bucket order assumes the key's effective input mapping is
//! order-preserving, true for a fixed-input key (the common case this engine
//! targets). A key whose wildcard input was bound to an XOR offset can
//! scramble that order; callers of such keys should prefer
//! [`crate::eval::eval_sequence_recipe`] or point evaluation instead.

use crate::block::Block;
use crate::error::{Error, Result};
use crate::key::Key;
use crate::memo::interval::{expand_full_tree, expand_ping_pong};
use crate::node::{self, Side};
use crate::output::LeafArithmetic;
use crate::prg::Prg;

/// Walks from `key`'s root down to the node rooting the minimal subtree
/// covering both `from_bucket` and `to_bucket`, returning that node, the
/// number of levels consumed, and the bucket index of the subtree's
/// leftmost leaf.
fn covering_subtree<P: Prg, T: LeafArithmetic>(
    prg: &P,
    key: &Key<T>,
    from_bucket: u64,
    to_bucket: u64,
) -> (Block, u32, u64) {
    let depth = key.depth();
    let shared = super::shared_prefix_len(from_bucket, to_bucket, depth);

    let mut node_at = key.root();
    for level in 0..shared {
        let bit = (from_bucket >> (depth - 1 - level)) & 1 == 1;
        node_at = node::expand_one(
            prg,
            node_at,
            Side::from_bit(bit),
            key.correction_words()[level as usize],
            key.advice()[level as usize],
        );
    }

    let remaining = depth - shared;
    let subtree_base = (from_bucket >> remaining) << remaining;
    (node_at, shared, subtree_base)
}

/// Evaluates `key` at every point in `[from, to]` (inclusive), returning one
/// output value per point in order (spec §4.5.2).
pub fn eval_interval<P: Prg, T: LeafArithmetic>(prg: &P, key: &Key<T>, from: u64, to: u64) -> Result<Vec<T>> {
    if !key.is_ready() {
        return Err(Error::invariant("evaluation attempted on a key with unbound wildcards"));
    }
    if from > to {
        return Err(Error::domain(format!("interval [{}, {}] is empty", from, to)));
    }
    let domain_size = 1u64.checked_shl(key.domain_bits()).unwrap_or(u64::MAX);
    if key.domain_bits() < 64 && to >= domain_size {
        return Err(Error::domain(format!("{} out of range for a {}-bit domain", to, key.domain_bits())));
    }

    let per = T::OUTPUTS_PER_LEAF as u64;
    let from_eff = key.effective_input(from);
    let to_eff = key.effective_input(to);
    let from_bucket = from_eff / per;
    let to_bucket = to_eff / per;

    let (subtree_root, shared_levels, subtree_base) = covering_subtree(prg, key, from_bucket, to_bucket);
    let remaining_cw = &key.correction_words()[shared_levels as usize..];
    let remaining_advice = &key.advice()[shared_levels as usize..];
    let leaves = expand_ping_pong(prg, subtree_root, remaining_cw, remaining_advice);

    let mut out = Vec::with_capacity((to - from + 1) as usize);
    for bucket in from_bucket..=to_bucket {
        let leaf_node = leaves[(bucket - subtree_base) as usize];
        let values = super::unpack_leaf(prg, leaf_node, key.leaf_correction(), !key.is_party_zero());
        let start_slot = if bucket == from_bucket { (from_eff % per) as usize } else { 0 };
        let end_slot = if bucket == to_bucket { (to_eff % per) as usize } else { T::OUTPUTS_PER_LEAF - 1 };
        out.extend(values[start_slot..=end_slot].iter().cloned());
    }
    Ok(out)
}

/// Same evaluation, keeping every level's row of the covering subtree alive
/// (spec §4.5.2 "full tree" layout) — useful when intermediate advice bits
/// must be inspected, exposed here as the raw per-level rows.
pub fn eval_interval_full_tree<P: Prg, T: LeafArithmetic>(
    prg: &P,
    key: &Key<T>,
    from: u64,
    to: u64,
) -> Result<Vec<Vec<Block>>> {
    if !key.is_ready() {
        return Err(Error::invariant("evaluation attempted on a key with unbound wildcards"));
    }
    let per = T::OUTPUTS_PER_LEAF as u64;
    let from_eff = key.effective_input(from);
    let to_eff = key.effective_input(to);
    let from_bucket = from_eff / per;
    let to_bucket = to_eff / per;

    let (subtree_root, shared_levels, _) = covering_subtree(prg, key, from_bucket, to_bucket);
    let remaining_cw = &key.correction_words()[shared_levels as usize..];
    let remaining_advice = &key.advice()[shared_levels as usize..];
    Ok(expand_full_tree(prg, subtree_root, remaining_cw, remaining_advice))
}
