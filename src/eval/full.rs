//! Full-domain evaluation (spec §4.5.3): the interval engine specialized to
//! `[0, 2^domain_bits - 1]`.

use crate::error::{Error, Result};
use crate::key::Key;
use crate::output::{Bit, BitBuffer, LeafArithmetic, OutputSink};
use crate::prg::Prg;

use super::interval::eval_interval;

/// Evaluates `key` at every point in its domain.
pub fn eval_full<P: Prg, T: LeafArithmetic>(prg: &P, key: &Key<T>) -> Result<Vec<T>> {
    if !key.is_ready() {
        return Err(Error::invariant("evaluation attempted on a key with unbound wildcards"));
    }
    let domain_size = 1u64.checked_shl(key.domain_bits()).ok_or_else(|| {
        Error::resource_exhaustion(format!("full-domain evaluation of {} points", key.domain_bits()))
    })?;
    eval_interval(prg, key, 0, domain_size - 1)
}

/// Full-domain evaluation for a `bit`-output key, writing directly into a
/// packed [`BitBuffer`] instead of materializing one `Bit` per `Vec` slot
/// (spec §4.5.3: "the output buffer is a packed bit-array").
pub fn eval_full_bits<P: Prg>(prg: &P, key: &Key<Bit>) -> Result<BitBuffer> {
    let values = eval_full(prg, key)?;
    let mut buffer = BitBuffer::new(values.len());
    for (i, v) in values.into_iter().enumerate() {
        buffer.write_slot(i, v);
    }
    Ok(buffer)
}
