//! Wildcard-input binding: one round trip (spec §4.7, §6: "one write of one
//! input-type-width by each party; one read of the same").
//!
//! The key was generated against a fresh random mask `r` (see
//! `key::generator`); this party holds `r`'s share. The real input `x*` is
//! itself secret-shared between the two parties out of band — the caller
//! supplies its share as `input_share_local`. Exchanging
//! `r_share XOR x*_share` and XOR-combining both parties' messages
//! reconstructs `offset = r XOR x*`, which evaluators then XOR into every
//! query (`Key::effective_input`).

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::key::Key;
use crate::output::LeafArithmetic;

enum State {
    AwaitingSend { message: u64 },
    AwaitingRecv { message: u64 },
    Complete { offset: u64 },
}

/// What the caller should do next.
pub enum InputBindStep {
    NeedSend { message: u64 },
    NeedRecv,
    Done { offset: u64 },
}

/// Drives the wildcard-input binding protocol for one key.
pub struct InputBindMachine {
    state: State,
}

impl InputBindMachine {
    /// `input_share_local` is this party's share of the real input `x*`
    /// (`x* = input_share_local XOR peer's input_share_local`).
    pub fn new<T: LeafArithmetic>(key: &Key<T>, input_share_local: u64) -> Result<Self> {
        let r_share = key
            .input_offset_share()
            .ok_or_else(|| Error::invariant("key has no pending input wildcard"))?;
        let message = r_share ^ input_share_local;
        Ok(InputBindMachine {
            state: State::AwaitingSend { message },
        })
    }

    pub fn next_step(&self) -> InputBindStep {
        match self.state {
            State::AwaitingSend { message } => InputBindStep::NeedSend { message },
            State::AwaitingRecv { .. } => InputBindStep::NeedRecv,
            State::Complete { offset } => InputBindStep::Done { offset },
        }
    }

    /// Call after the caller has written `next_step()`'s message to the wire.
    pub fn on_sent(&mut self) {
        if let State::AwaitingSend { message } = self.state {
            self.state = State::AwaitingRecv { message };
        }
    }

    /// Call after the caller has read the peer's message off the wire.
    pub fn on_received(&mut self, peer_message: u64) {
        if let State::AwaitingRecv { message } = self.state {
            self.state = State::Complete {
                offset: message ^ peer_message,
            };
        }
    }

    /// Finishes the protocol, returning the reconstructed offset once
    /// `Done` — `None` if called earlier.
    pub fn into_offset(self) -> Option<u64> {
        match self.state {
            State::Complete { offset } => Some(offset),
            _ => None,
        }
    }
}

/// Runs the protocol to completion over a blocking stream, and applies the
/// result to `key`.
pub fn bind_input_sync<T: LeafArithmetic>(
    key: &mut Key<T>,
    input_share_local: u64,
    stream: &mut (impl Read + Write),
) -> Result<()> {
    let mut machine = InputBindMachine::new(key, input_share_local)?;
    loop {
        match machine.next_step() {
            InputBindStep::NeedSend { message } => {
                stream
                    .write_all(&message.to_le_bytes())
                    .map_err(|e| Error::transport(e.to_string(), 0))?;
                machine.on_sent();
            }
            InputBindStep::NeedRecv => {
                let mut buf = [0u8; 8];
                stream
                    .read_exact(&mut buf)
                    .map_err(|e| Error::transport(e.to_string(), 0))?;
                machine.on_received(u64::from_le_bytes(buf));
            }
            InputBindStep::Done { offset } => {
                tracing::debug!("wildcard-input offset bound after 1 round trip");
                key.apply_bound_input_offset(offset);
                return Ok(());
            }
        }
    }
}
