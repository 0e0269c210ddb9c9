//! A distributed point function (DPF) library (spec §1-§4): two-party key
//! generation for point functions over typed input domains and output
//! groups, four evaluation engines (point, interval, full-domain, sequence)
//! each with specialized memoizers, and post-generation "vernalization" for
//! keys generated against a wildcard input or output.
//!
//! A point function `f_{x*, y}` returns `y` at `x*` and the output group's
//! zero everywhere else. [`key::gen`] splits `f_{x*,y}` into two keys such
//! that neither key alone reveals `x*` or `y`, but evaluating both keys at
//! any `x` and combining the results (via [`output::LeafArithmetic::combine`])
//! reconstructs `f_{x*,y}(x)`.
//!
//! This crate does not include the higher-level "Grotto" secure
//! piecewise-polynomial evaluation facility built on top of DPFs
//! (SPEC_FULL §B.6) — that is a distinct protocol with its own MPC
//! coordination, out of scope for a key-generation-and-evaluation library.
//!
//! ## Modules
//!
//! - [`block`] — the 128-bit seed/control-bit representation.
//! - [`prg`] — the length-doubling PRG contract and its realizations.
//! - [`node`] — single-level interior-node expansion, shared by generation
//!   and every evaluation engine.
//! - [`output`] — the output-type algebra (`LeafArithmetic`) and concrete
//!   output types.
//! - [`leaf`] — leaf-bucket arithmetic and correction-word derivation.
//! - [`input`] — typed input domains.
//! - [`bitarray`], [`parallel_bits`] — packed bit containers for `bit`-output
//!   evaluation.
//! - [`key`] — the key data model, generator, and wire format.
//! - [`memo`] — memoizer layouts reused across evaluation calls.
//! - [`eval`] — the four evaluation engines.
//! - [`vernalize`] — post-generation binding of wildcard inputs/outputs.
//! - [`error`] — this crate's error type.

pub mod bitarray;
pub mod block;
pub mod error;
pub mod eval;
pub mod input;
pub mod key;
pub mod leaf;
pub mod memo;
pub mod node;
pub mod output;
pub mod parallel_bits;
pub mod prg;
pub mod vernalize;

pub use error::{Error, Result};
pub use key::{gen, Key};
