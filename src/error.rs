//! Error kinds for key generation, evaluation, and vernalization (spec §7).

use thiserror::Error;

/// Errors produced by this crate.
///
/// Domain-violation and invariant-violation are programmer errors: in debug
/// builds, callers that can prove they hold statically should prefer
/// `debug_assert!` at the call site and treat this variant as a last resort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An input value lies outside its declared domain (e.g. a keyword
    /// character not in the alphabet, or `x` out of the configured bit width).
    #[error("domain violation: {0}")]
    DomainViolation(String),

    /// Evaluation was attempted on a key with unbound wildcards, or a
    /// memoizer/key depth mismatch was detected.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Allocation or PRG failure.
    #[error("resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// Wire read/write failure or short read/write during vernalization.
    #[error("transport error after {bytes_transferred} bytes: {message}")]
    Transport {
        message: String,
        bytes_transferred: usize,
    },

    /// An async vernalization operation was cancelled between suspension
    /// points; the key has been rolled back to its pre-call state.
    #[error("operation cancelled after {bytes_transferred} bytes")]
    Cancellation { bytes_transferred: usize },
}

impl Error {
    pub fn domain(msg: impl Into<String>) -> Self {
        Error::DomainViolation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }

    pub fn resource_exhaustion(msg: impl Into<String>) -> Self {
        Error::ResourceExhaustion(msg.into())
    }

    pub fn transport(msg: impl Into<String>, bytes_transferred: usize) -> Self {
        Error::Transport {
            message: msg.into(),
            bytes_transferred,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
