//! Sequence recipe and memoizers (spec §4.5.4): a precomputed sparse
//! traversal plan over the tree nodes touched by at least one query in a
//! sorted input sequence, and three memoizer layouts that replay it.
//!
//! The recipe partitions the sorted sequence level by level on the current
//! bit (sorted order and prefix-tree order coincide, so each node's range of
//! queries stays contiguous after a split); `steps[]` records, per visited
//! node in BFS order, which of its two children exist. `level_endpoints[]`
//! marks where each level's steps end within the flat `steps[]` array.

use crate::block::Block;
use crate::node::{self, Advice, Side};
use crate::prg::Prg;

/// Whether a visited node's left and/or right child is on the path to some
/// query (spec §4.5.4: "partitioning each current block... into left and
/// right sub-blocks").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub has_left: bool,
    pub has_right: bool,
}

/// A precomputed traversal plan for one sorted, deduplicated-or-not input
/// sequence against one tree depth (spec §4.5.4).
#[derive(Clone, Debug)]
pub struct Recipe {
    steps: Vec<Step>,
    level_endpoints: Vec<usize>,
    output_indices: Vec<u64>,
    num_leaf_nodes: usize,
}

impl Recipe {
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn level_endpoints(&self) -> &[usize] {
        &self.level_endpoints
    }

    /// For each query (in input order), its position in the compact output
    /// buffer this recipe drives (`local_leaf_index * outputs_per_leaf +
    /// slot`). Strictly increasing when the input sequence is strictly
    /// sorted (spec §8 invariant 5).
    pub fn output_indices(&self) -> &[u64] {
        &self.output_indices
    }

    pub fn num_leaf_nodes(&self) -> usize {
        self.num_leaf_nodes
    }

    /// Builds a recipe for `xs` (must already be sorted ascending) against a
    /// tree of `depth` interior levels and leaf buckets holding
    /// `outputs_per_leaf` values each.
    pub fn build(xs: &[u64], depth: u32, outputs_per_leaf: usize) -> Self {
        debug_assert!(xs.windows(2).all(|w| w[0] <= w[1]), "xs must be sorted");

        let per = outputs_per_leaf as u64;
        let mut steps = Vec::new();
        let mut level_endpoints = Vec::with_capacity(depth as usize);
        let mut node_ranges: Vec<(usize, usize)> = vec![(0, xs.len())];

        for level in 0..depth {
            let shift = depth - 1 - level;
            let mut next_ranges = Vec::with_capacity(node_ranges.len() * 2);
            for (start, end) in node_ranges {
                // The tree branches on the bucket's bits (`x / outputs_per_leaf`),
                // not `x`'s own low bits — a leaf may hold more than one output.
                let mid = start + xs[start..end].partition_point(|x| ((x / per) >> shift) & 1 == 0);
                let has_left = mid > start;
                let has_right = mid < end;
                steps.push(Step { has_left, has_right });
                if has_left {
                    next_ranges.push((start, mid));
                }
                if has_right {
                    next_ranges.push((mid, end));
                }
            }
            level_endpoints.push(steps.len());
            node_ranges = next_ranges;
        }

        let num_leaf_nodes = node_ranges.len();
        let mut output_indices = Vec::with_capacity(xs.len());
        for (local_idx, (start, end)) in node_ranges.into_iter().enumerate() {
            for &x in &xs[start..end] {
                let slot = x % outputs_per_leaf as u64;
                output_indices.push(local_idx as u64 * outputs_per_leaf as u64 + slot);
            }
        }

        Recipe {
            steps,
            level_endpoints,
            output_indices,
            num_leaf_nodes,
        }
    }
}

/// Expands a recipe, keeping every level's row (spec §4.5.4 "full tree"
/// layout): `rows[0] == [root]`, `rows[depth]` is the final leaf-node row in
/// left-to-right bucket order.
pub fn expand_full_tree<P: Prg>(
    prg: &P,
    recipe: &Recipe,
    root: Block,
    correction_words: &[Block],
    advice: &[Advice],
) -> Vec<Vec<Block>> {
    let mut rows = Vec::with_capacity(correction_words.len() + 1);
    rows.push(vec![root]);
    let mut step_cursor = 0usize;
    for (level, (cw, adv)) in correction_words.iter().zip(advice.iter()).enumerate() {
        let prev = rows.last().unwrap();
        let level_end = recipe.level_endpoints[level];
        let level_steps = &recipe.steps[step_cursor..level_end];
        debug_assert_eq!(level_steps.len(), prev.len());
        let mut next = Vec::new();
        for (parent, step) in prev.iter().zip(level_steps.iter()) {
            if step.has_left {
                next.push(node::expand_one(prg, *parent, Side::Left, *cw, *adv));
            }
            if step.has_right {
                next.push(node::expand_one(prg, *parent, Side::Right, *cw, *adv));
            }
        }
        rows.push(next);
        step_cursor = level_end;
    }
    rows
}

/// Same traversal, keeping only two alternating rows alive at once (spec
/// §4.5.4 "double space" layout).
pub fn expand_double_space<P: Prg>(
    prg: &P,
    recipe: &Recipe,
    root: Block,
    correction_words: &[Block],
    advice: &[Advice],
) -> Vec<Block> {
    let mut row = vec![root];
    let mut step_cursor = 0usize;
    for (level, (cw, adv)) in correction_words.iter().zip(advice.iter()).enumerate() {
        let level_end = recipe.level_endpoints[level];
        let level_steps = &recipe.steps[step_cursor..level_end];
        debug_assert_eq!(level_steps.len(), row.len());
        let mut next = Vec::new();
        for (parent, step) in row.iter().zip(level_steps.iter()) {
            if step.has_left {
                next.push(node::expand_one(prg, *parent, Side::Left, *cw, *adv));
            }
            if step.has_right {
                next.push(node::expand_one(prg, *parent, Side::Right, *cw, *adv));
            }
        }
        row = next;
        step_cursor = level_end;
    }
    row
}

/// In-place reversing layout (spec §4.5.4): a single row sized
/// `recipe.num_leaf_nodes()`, reused across every level.
///
/// Each step produces at least one child (a node is only recorded if its
/// range is non-empty), so node counts never shrink between levels — the
/// buffer, sized to the final (largest) row, never overflows. Children are
/// placed by scanning parents from the last one to the first and writing
/// their children from the last slot backward (last parent's last child
/// lands in the last slot the previous level could have reached); since the
/// cumulative child count from the right is always at least the cumulative
/// parent count from the right, the write cursor never overtakes the read
/// cursor, so expansion never clobbers a parent before it has been read.
/// This crate always walks in that one direction rather than alternating
/// per level (see DESIGN.md) — the result is identical to the full-tree and
/// double-space layouts either way.
pub struct InPlaceReversingMemoizer {
    buf: Vec<Block>,
}

impl InPlaceReversingMemoizer {
    pub fn new(recipe: &Recipe) -> Self {
        InPlaceReversingMemoizer {
            buf: vec![Block::ZERO; recipe.num_leaf_nodes().max(1)],
        }
    }

    /// Expands `root` through the full recipe in place, returning the final
    /// leaf-node row (left-to-right bucket order) as a slice of the
    /// memoizer's buffer.
    pub fn expand<P: Prg>(
        &mut self,
        prg: &P,
        recipe: &Recipe,
        root: Block,
        correction_words: &[Block],
        advice: &[Advice],
    ) -> &[Block] {
        self.buf[0] = root;
        let mut row_len = 1usize;
        let mut step_cursor = 0usize;

        for (level, (cw, adv)) in correction_words.iter().zip(advice.iter()).enumerate() {
            let level_end = recipe.level_endpoints[level];
            let level_steps = &recipe.steps[step_cursor..level_end];
            debug_assert_eq!(level_steps.len(), row_len);

            let child_count: usize = level_steps
                .iter()
                .map(|s| s.has_left as usize + s.has_right as usize)
                .sum();

            let mut write = child_count;
            for (i, step) in level_steps.iter().enumerate().rev() {
                let parent = self.buf[i];
                if step.has_right {
                    write -= 1;
                    self.buf[write] = node::expand_one(prg, parent, Side::Right, *cw, *adv);
                }
                if step.has_left {
                    write -= 1;
                    self.buf[write] = node::expand_one(prg, parent, Side::Left, *cw, *adv);
                }
            }
            debug_assert_eq!(write, 0);

            tracing::trace!(level, row_len = child_count, "sequence memoizer advanced one level");
            row_len = child_count;
            step_cursor = level_end;
        }

        &self.buf[..row_len]
    }
}
