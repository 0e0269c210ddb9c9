//! Wildcard-output binding: two round trips per column (spec §4.7, §6: "each
//! party writes one output-type-width (blinded share), reads one, writes one
//! leaf-type-width (leaf share), reads one").
//!
//! Each key holds a share `(alpha_i, combined_i)` of a fresh random mask
//! `alpha` and of `combined = alpha combine partial`, where `partial` is the
//! (fully gen-time-computable) sum of both parties' uncorrected leaf values
//! at the wildcard slot. The caller supplies its share `y_i` of the real
//! output value (`y = y_0 combine y_1`). See DESIGN.md for the derivation
//! that makes the final leaf-share combination reconstruct
//! `y combine_inverse partial`, i.e. the leaf correction word the slot needs.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::key::Key;
use crate::output::LeafArithmetic;

enum State<T> {
    AwaitingSendBlinded {
        blinded_local: T,
        combined_share: T,
        is_party_zero: bool,
        slot: usize,
    },
    AwaitingRecvBlinded {
        blinded_local: T,
        combined_share: T,
        is_party_zero: bool,
        slot: usize,
    },
    AwaitingSendLeafShare {
        leaf_share_local: T,
        slot: usize,
    },
    AwaitingRecvLeafShare {
        leaf_share_local: T,
        slot: usize,
    },
    Complete {
        slot: usize,
        value: T,
    },
}

pub enum OutputBindStep<T> {
    NeedSendBlinded { message: T },
    NeedRecvBlinded,
    NeedSendLeafShare { message: T },
    NeedRecvLeafShare,
    Done { slot: usize, value: T },
}

/// Drives the wildcard-output binding protocol for one key's column.
pub struct OutputBindMachine<T> {
    state: Option<State<T>>,
}

impl<T: LeafArithmetic> OutputBindMachine<T> {
    /// `y_share` is this party's share of the real output value. `is_party_zero`
    /// distinguishes the two keys of a pair — exactly one of them must pass
    /// `true`, matching the orientation `key::generator::gen` assigned.
    pub fn new(key: &Key<T>, y_share: T, is_party_zero: bool) -> Result<Self> {
        let corr = key
            .wildcard_output()
            .ok_or_else(|| Error::invariant("key has no pending output wildcard"))?;
        let blinded_local = y_share.combine(&corr.alpha_share);
        Ok(OutputBindMachine {
            state: Some(State::AwaitingSendBlinded {
                blinded_local,
                combined_share: corr.combined_share.clone(),
                is_party_zero,
                slot: corr.slot,
            }),
        })
    }

    pub fn next_step(&self) -> OutputBindStep<T> {
        match self.state.as_ref().expect("machine state always present") {
            State::AwaitingSendBlinded { blinded_local, .. } => OutputBindStep::NeedSendBlinded {
                message: blinded_local.clone(),
            },
            State::AwaitingRecvBlinded { .. } => OutputBindStep::NeedRecvBlinded,
            State::AwaitingSendLeafShare {
                leaf_share_local, ..
            } => OutputBindStep::NeedSendLeafShare {
                message: leaf_share_local.clone(),
            },
            State::AwaitingRecvLeafShare { .. } => OutputBindStep::NeedRecvLeafShare,
            State::Complete { slot, value } => OutputBindStep::Done {
                slot: *slot,
                value: value.clone(),
            },
        }
    }

    pub fn on_sent(&mut self) {
        self.state = self.state.take().map(|state| match state {
            State::AwaitingSendBlinded {
                blinded_local,
                combined_share,
                is_party_zero,
                slot,
            } => State::AwaitingRecvBlinded {
                blinded_local,
                combined_share,
                is_party_zero,
                slot,
            },
            State::AwaitingSendLeafShare {
                leaf_share_local,
                slot,
            } => State::AwaitingRecvLeafShare {
                leaf_share_local,
                slot,
            },
            other => other,
        });
    }

    pub fn on_received_blinded(&mut self, peer_blinded: T) {
        self.state = self.state.take().map(|state| match state {
            State::AwaitingRecvBlinded {
                blinded_local,
                combined_share,
                is_party_zero,
                slot,
            } => {
                let blind = blinded_local.combine(&peer_blinded);
                let base = if is_party_zero { blind } else { T::zero() };
                let leaf_share_local = base.combine_inverse(&combined_share);
                State::AwaitingSendLeafShare {
                    leaf_share_local,
                    slot,
                }
            }
            other => other,
        });
    }

    pub fn on_received_leaf_share(&mut self, peer_leaf_share: T) {
        self.state = self.state.take().map(|state| match state {
            State::AwaitingRecvLeafShare {
                leaf_share_local,
                slot,
            } => State::Complete {
                slot,
                value: leaf_share_local.combine(&peer_leaf_share),
            },
            other => other,
        });
    }
}

/// Runs the protocol to completion over a blocking stream, and applies the
/// result to `key`.
pub fn bind_output_sync<T: LeafArithmetic>(
    key: &mut Key<T>,
    y_share: T,
    is_party_zero: bool,
    stream: &mut (impl Read + Write),
) -> Result<()> {
    let mut machine = OutputBindMachine::new(key, y_share, is_party_zero)?;
    loop {
        match machine.next_step() {
            OutputBindStep::NeedSendBlinded { message } => {
                for block in T::pack_in_leaf(&vec![message; T::OUTPUTS_PER_LEAF]) {
                    stream
                        .write_all(&block.to_le_bytes())
                        .map_err(|e| Error::transport(e.to_string(), 0))?;
                }
                machine.on_sent();
            }
            OutputBindStep::NeedRecvBlinded => {
                let value = read_leaf_value::<T>(stream)?;
                machine.on_received_blinded(value);
            }
            OutputBindStep::NeedSendLeafShare { message } => {
                for block in T::pack_in_leaf(&vec![message; T::OUTPUTS_PER_LEAF]) {
                    stream
                        .write_all(&block.to_le_bytes())
                        .map_err(|e| Error::transport(e.to_string(), 0))?;
                }
                machine.on_sent();
            }
            OutputBindStep::NeedRecvLeafShare => {
                let value = read_leaf_value::<T>(stream)?;
                machine.on_received_leaf_share(value);
            }
            OutputBindStep::Done { slot, value } => {
                tracing::debug!(slot, "wildcard-output leaf share bound after 2 round trips");
                key.apply_wildcard_output(slot, value);
                return Ok(());
            }
        }
    }
}

fn read_leaf_value<T: LeafArithmetic>(stream: &mut impl Read) -> Result<T> {
    use crate::block::{Block, BLOCK_SIZE};
    let mut blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
    for block in blocks.iter_mut() {
        let mut buf = [0u8; BLOCK_SIZE];
        stream
            .read_exact(&mut buf)
            .map_err(|e| Error::transport(e.to_string(), 0))?;
        *block = Block::from_le_bytes(&buf)?;
    }
    Ok(T::unpack_from_leaf(&blocks)
        .into_iter()
        .next()
        .expect("OUTPUTS_PER_LEAF >= 1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::generator::gen;
    use crate::output::Int32;
    use crate::prg::FixedKeyAesPrg;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn two_parties_reconstruct_the_requested_value_at_the_slot() {
        let prg = FixedKeyAesPrg::new();
        let mut rng = StdRng::seed_from_u64(31);
        let (mut k0, mut k1) = gen::<_, Int32>(&prg, 10, Some(7), None, &mut rng).unwrap();
        assert!(k0.is_output_wildcard_pending());

        let y = Int32(0x1234_5678);
        let y0 = Int32(0x1111_1111);
        let y1 = y.combine_inverse(&y0);

        let mut m0 = OutputBindMachine::new(&k0, y0, true).unwrap();
        let mut m1 = OutputBindMachine::new(&k1, y1, false).unwrap();

        let blinded0 = match m0.next_step() {
            OutputBindStep::NeedSendBlinded { message } => message,
            _ => panic!(),
        };
        m0.on_sent();
        let blinded1 = match m1.next_step() {
            OutputBindStep::NeedSendBlinded { message } => message,
            _ => panic!(),
        };
        m1.on_sent();

        m0.on_received_blinded(blinded1);
        m1.on_received_blinded(blinded0);

        let share0 = match m0.next_step() {
            OutputBindStep::NeedSendLeafShare { message } => message,
            _ => panic!(),
        };
        m0.on_sent();
        let share1 = match m1.next_step() {
            OutputBindStep::NeedSendLeafShare { message } => message,
            _ => panic!(),
        };
        m1.on_sent();

        m0.on_received_leaf_share(share1);
        m1.on_received_leaf_share(share0);

        let (slot0, value0) = match m0.next_step() {
            OutputBindStep::Done { slot, value } => (slot, value),
            _ => panic!(),
        };
        let (slot1, value1) = match m1.next_step() {
            OutputBindStep::Done { slot, value } => (slot, value),
            _ => panic!(),
        };
        assert_eq!(slot0, slot1);
        assert_eq!(value0, value1);

        k0.apply_wildcard_output(slot0, value0.clone());
        k1.apply_wildcard_output(slot1, value1);
        assert!(!k0.is_output_wildcard_pending());
        assert_eq!(k0.leaf_correction(), k1.leaf_correction());
    }
}
