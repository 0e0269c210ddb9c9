//! Path memoizer for point evaluation (spec §4.5.1): caches the `depth + 1`
//! blocks along the most recent query's root-to-leaf path and, on the next
//! query, restarts expansion only below the first level at which the two
//! inputs' bit representations diverge.

use crate::block::Block;
use crate::input::InputType;
use crate::node::{self, Advice};
use crate::prg::Prg;

/// Caches one root-to-leaf path. Reusable across queries of matching depth.
pub struct PathMemoizer<I> {
    path: Vec<Block>,
    last_input: Option<I>,
}

impl<I: InputType> PathMemoizer<I> {
    pub fn new(depth: u32) -> Self {
        PathMemoizer {
            path: Vec::with_capacity(depth as usize + 1),
            last_input: None,
        }
    }

    /// Expands the path down to `x`, reusing the shared prefix with the
    /// previous query when possible, and returns the leaf-level block.
    pub fn expand<P: Prg>(
        &mut self,
        prg: &P,
        root: Block,
        correction_words: &[Block],
        advice: &[Advice],
        x: &I,
    ) -> Block {
        let depth = correction_words.len() as u32;
        let reuse_levels = match &self.last_input {
            Some(prev) if self.path.len() as u32 == depth + 1 => {
                prev.countl_zero_symmetric_difference(x).min(depth)
            }
            _ => 0,
        };

        if self.path.is_empty() {
            self.path.push(root);
        }
        self.path.truncate(reuse_levels as usize + 1);
        tracing::trace!(reuse_levels, depth, "path memoizer resuming below shared prefix");

        for level in reuse_levels..depth {
            let parent = self.path[level as usize];
            let side = crate::node::Side::from_bit(x.bit_at_level(level));
            let child = node::expand_one(prg, parent, side, correction_words[level as usize], advice[level as usize]);
            self.path.push(child);
        }

        self.last_input = Some(x.clone());
        self.path[depth as usize]
    }
}

/// The stateless counterpart (spec §4.5.1: "the non-memoizing variant is
/// stateless"): walks the full path every call with no cached state.
pub fn expand_no_memo<P: Prg, I: InputType>(
    prg: &P,
    root: Block,
    correction_words: &[Block],
    advice: &[Advice],
    x: &I,
) -> Block {
    let mut cur = root;
    for (level, (cw, adv)) in correction_words.iter().zip(advice.iter()).enumerate() {
        let side = crate::node::Side::from_bit(x.bit_at_level(level as u32));
        cur = node::expand_one(prg, cur, side, *cw, *adv);
    }
    cur
}
