//! Interval memoizer for contiguous-range evaluation (spec §4.5.2): a
//! breadth-first expansion from the minimal covering subtree down to the
//! interval's leaf buckets, offered in two layouts that produce identical
//! final rows — ping-pong (two alternating rows) and full-tree (every level
//! retained, useful when intermediate advice bits must be inspected).

use crate::block::Block;
use crate::node::{self, Advice, Side};
use crate::prg::Prg;

/// Expands `root` breadth-first through every level, keeping only the
/// current and previous row alive (spec §4.5.2 "two-row... ping-pong").
pub fn expand_ping_pong<P: Prg>(
    prg: &P,
    root: Block,
    correction_words: &[Block],
    advice: &[Advice],
) -> Vec<Block> {
    let mut row = vec![root];
    for (level, (cw, adv)) in correction_words.iter().zip(advice.iter()).enumerate() {
        let mut next = Vec::with_capacity(row.len() * 2);
        for parent in &row {
            next.push(node::expand_one(prg, *parent, Side::Left, *cw, *adv));
            next.push(node::expand_one(prg, *parent, Side::Right, *cw, *adv));
        }
        row = next;
        tracing::trace!(level, row_len = row.len(), "interval memoizer advanced one level");
    }
    row
}

/// Same expansion, but retains every level's row (spec §4.5.2 "full tree").
/// `rows[0]` is `[root]`; `rows[depth]` is the final leaf-bucket row, equal
/// to `expand_ping_pong`'s result.
pub fn expand_full_tree<P: Prg>(
    prg: &P,
    root: Block,
    correction_words: &[Block],
    advice: &[Advice],
) -> Vec<Vec<Block>> {
    let mut rows = Vec::with_capacity(correction_words.len() + 1);
    rows.push(vec![root]);
    for (cw, adv) in correction_words.iter().zip(advice.iter()) {
        let prev = rows.last().unwrap();
        let mut next = Vec::with_capacity(prev.len() * 2);
        for parent in prev {
            next.push(node::expand_one(prg, *parent, Side::Left, *cw, *adv));
            next.push(node::expand_one(prg, *parent, Side::Right, *cw, *adv));
        }
        rows.push(next);
    }
    rows
}
