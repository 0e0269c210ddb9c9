//! Single-level interior-node expansion (spec §4.2). Shared by every
//! evaluation engine and by the key generator.

use crate::block::Block;
use crate::prg::Prg;

/// Which child of a node is being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn position(self) -> u64 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// The bit of `x*` (or any traversal target) selecting this side.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// The per-level advice pair `(t_L, t_R)` (spec §3, §4.2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Advice {
    pub t_left: bool,
    pub t_right: bool,
}

impl Advice {
    pub fn new(t_left: bool, t_right: bool) -> Self {
        Advice { t_left, t_right }
    }

    fn bit_for(self, side: Side) -> bool {
        match side {
            Side::Left => self.t_left,
            Side::Right => self.t_right,
        }
    }

    /// Packs the two bits low, as the wire format requires (spec §6: "the
    /// advice array... two bits per entry packed low").
    pub fn pack(self) -> u8 {
        (self.t_left as u8) | ((self.t_right as u8) << 1)
    }

    pub fn unpack(byte: u8) -> Self {
        Advice {
            t_left: byte & 1 != 0,
            t_right: byte & 2 != 0,
        }
    }
}

/// Expands `parent` into its `side` child, applying the level's correction
/// word and advice bit if `parent`'s control bit is set (spec §4.2).
pub fn expand_one<P: Prg>(prg: &P, parent: Block, side: Side, cw: Block, advice: Advice) -> Block {
    let on = parent.control_bit();
    let seed = parent.seed_part();
    let raw = prg.eval(&seed, side.position());
    if on {
        raw ^ cw.with_control_bit(advice.bit_for(side))
    } else {
        raw
    }
}

/// Expands both children of `parent` at once via `eval01`.
pub fn expand01<P: Prg>(prg: &P, parent: Block, cw: Block, advice: Advice) -> (Block, Block) {
    let on = parent.control_bit();
    let seed = parent.seed_part();
    let (raw_l, raw_r) = prg.eval01(&seed);
    if on {
        (
            raw_l ^ cw.with_control_bit(advice.t_left),
            raw_r ^ cw.with_control_bit(advice.t_right),
        )
    } else {
        (raw_l, raw_r)
    }
}
