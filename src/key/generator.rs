//! Key generation (spec §4.4): walks a fresh GGM tree from the root,
//! deriving one correction word and advice pair per level via the standard
//! distributed-point-function construction, then a leaf correction word (or,
//! for a wildcard output, the correlation `vernalize` will later consume).
//!
//! Wildcard inputs are generated against a fresh random mask instead of the
//! caller's `x*` — the mask is what's actually baked into the tree, and the
//! true point is bound later by `vernalize::bind_input` (spec §4.7).

use rand::RngCore;

use crate::block::Block;
use crate::error::{Error, Result};
use crate::key::definition::{Key, WildcardOutputCorrelation};
use crate::leaf;
use crate::node::{self, Advice, Side};
use crate::output::{sample_leaf_value, LeafArithmetic};
use crate::prg::SecurePrg;

/// Generates a matched key pair for one output column.
///
/// `x_star` is `None` for a wildcard input; `y` is `None` for a wildcard
/// output. `domain_bits` is the bit width of the input domain (spec §3:
/// `depth = ceil(log2(|domain|)) - lg(outputs_per_leaf)`).
pub fn gen<P: SecurePrg, T: LeafArithmetic>(
    prg: &P,
    domain_bits: u32,
    x_star: Option<u64>,
    y: Option<T>,
    rng: &mut impl RngCore,
) -> Result<(Key<T>, Key<T>)> {
    let span = tracing::debug_span!(
        "key_gen",
        domain_bits,
        wildcard_input = x_star.is_none(),
        wildcard_output = y.is_none()
    );
    let _enter = span.enter();

    let leaf_bits = (T::OUTPUTS_PER_LEAF as u64).trailing_zeros();
    if domain_bits < leaf_bits {
        return Err(Error::domain(format!(
            "domain_bits {} too small for a leaf holding {} outputs",
            domain_bits,
            T::OUTPUTS_PER_LEAF
        )));
    }
    let depth = domain_bits - leaf_bits;

    let domain_size = 1u64.checked_shl(domain_bits).unwrap_or(u64::MAX);
    if let Some(x) = x_star {
        if domain_bits < 64 && x >= domain_size {
            return Err(Error::domain(format!(
                "x* {} out of range for a {}-bit domain",
                x, domain_bits
            )));
        }
    }

    let (tree_point, input_offset_shares) = match x_star {
        Some(x) => (x, None),
        None => {
            let mask = if domain_bits >= 64 {
                rng.next_u64()
            } else {
                rng.next_u64() % domain_size
            };
            let share0 = if domain_bits >= 64 {
                rng.next_u64()
            } else {
                rng.next_u64() % domain_size
            };
            // XOR of two values below `domain_size` (a power of two) never
            // carries out of the low `domain_bits` bits.
            let share1 = mask ^ share0;
            (mask, Some((share0, share1)))
        }
    };

    let mut root0 = Block::random(rng).with_control_bit(false);
    let mut root1 = Block::random(rng).with_control_bit(true);
    let seed0_root = root0;
    let seed1_root = root1;

    let mut correction_words = Vec::with_capacity(depth as usize);
    let mut advice = Vec::with_capacity(depth as usize);

    // The interior tree only ever branches on the top `depth` bits of
    // `tree_point`; the low `leaf_bits` bits select the slot within the
    // leaf bucket (see `leaf::bucket_and_slot`).
    let bucket = tree_point >> leaf_bits;

    for level in 0..depth {
        let bit = (bucket >> (depth - 1 - level)) & 1 == 1;
        let side = Side::from_bit(bit);

        let (s0l, s0r) = prg.eval01(&root0.seed_part());
        let (s1l, s1r) = prg.eval01(&root1.seed_part());
        let (keep0, lose0) = match side {
            Side::Left => (s0l, s0r),
            Side::Right => (s0r, s0l),
        };
        let (keep1, lose1) = match side {
            Side::Left => (s1l, s1r),
            Side::Right => (s1r, s1l),
        };

        let cw = lose0 ^ lose1;
        let tcw_keep = keep0.control_bit() ^ keep1.control_bit() ^ true;
        let tcw_lose = lose0.control_bit() ^ lose1.control_bit();
        let level_advice = match side {
            Side::Left => Advice::new(tcw_keep, tcw_lose),
            Side::Right => Advice::new(tcw_lose, tcw_keep),
        };

        root0 = node::expand_one(prg, root0, side, cw, level_advice);
        root1 = node::expand_one(prg, root1, side, cw, level_advice);
        correction_words.push(cw);
        advice.push(level_advice);
    }

    let per = T::OUTPUTS_PER_LEAF;
    let mut leaf0_blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
    let mut leaf1_blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
    prg.bulk_eval(&root0.seed_part(), 0, &mut leaf0_blocks);
    prg.bulk_eval(&root1.seed_part(), 0, &mut leaf1_blocks);
    let leaf0 = T::unpack_from_leaf(&leaf0_blocks);
    let leaf1 = T::unpack_from_leaf(&leaf1_blocks);
    debug_assert_eq!(leaf0.len(), per);
    debug_assert_eq!(leaf1.len(), per);

    let (_, slot) = leaf::bucket_and_slot::<T>(tree_point);
    // Exactly one of the two final leaf nodes has its control bit set (the
    // GGM-tree on-path invariant); that party is the one whose leaf
    // correction word actually gets applied at eval time (spec §8 invariant
    // 1), so the correction's sign is derived relative to it.
    let party0_owns_correction = root0.control_bit();

    let (leaf_correction, wildcard_output0, wildcard_output1) = match y {
        Some(target) => {
            let lcw = leaf::derive_leaf_correction(&leaf0, &leaf1, slot, &target, party0_owns_correction);
            (lcw, None, None)
        }
        None => {
            let partial = if party0_owns_correction {
                leaf0[slot].combine_inverse(&leaf1[slot])
            } else {
                leaf1[slot].combine_inverse(&leaf0[slot])
            };
            let partial0 = sample_leaf_value::<T>(rng);
            let partial1 = partial.combine_inverse(&partial0);
            let alpha0 = sample_leaf_value::<T>(rng);
            let alpha1 = sample_leaf_value::<T>(rng);
            let combined0 = alpha0.combine(&partial0);
            let combined1 = alpha1.combine(&partial1);
            let lcw = vec![T::zero(); per];
            (
                lcw,
                Some(WildcardOutputCorrelation {
                    slot,
                    alpha_share: alpha0,
                    combined_share: combined0,
                }),
                Some(WildcardOutputCorrelation {
                    slot,
                    alpha_share: alpha1,
                    combined_share: combined1,
                }),
            )
        }
    };

    let key0 = Key {
        root: seed0_root,
        correction_words: correction_words.clone(),
        advice: advice.clone(),
        depth,
        domain_bits,
        leaf_correction: leaf_correction.clone(),
        wildcard_output: wildcard_output0,
        input_offset_share: input_offset_shares.map(|(s0, _)| s0),
        bound_input_offset: None,
        is_party_zero: true,
    };
    let key1 = Key {
        root: seed1_root,
        correction_words,
        advice,
        depth,
        domain_bits,
        leaf_correction,
        wildcard_output: wildcard_output1,
        input_offset_share: input_offset_shares.map(|(_, s1)| s1),
        bound_input_offset: None,
        is_party_zero: false,
    };

    tracing::debug!(depth, "key pair generated");
    Ok((key0, key1))
}
