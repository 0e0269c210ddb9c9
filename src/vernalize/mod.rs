//! Wildcard vernalization (spec §4.7): the online protocol that binds a real
//! input and/or output value into a key generated with one or both wildcard.
//!
//! Both directions are modeled as explicit state machines the caller drives
//! (Design Notes §9: prefer an explicit coroutine/state-machine over a
//! runtime-bound `Future`, since this crate has no async runtime dependency
//! of its own). A machine never mutates the `Key` until its final step —
//! cancelling mid-protocol by dropping the machine leaves the key exactly as
//! it was (spec §5: "on cancellation... the key is rolled back to the prior
//! state"). Synchronous convenience wrappers drive a machine to completion
//! over a blocking `Read + Write` stream.

pub mod input;
pub mod output;

pub use input::{bind_input_sync, InputBindMachine, InputBindStep};
pub use output::{bind_output_sync, OutputBindMachine, OutputBindStep};
