//! Wire format for key transport (spec §6): little-endian, fixed field order.
//!
//! ```text
//! interior correction words (depth · |block|)
//! advice array              (depth bytes, two bits per entry packed low)
//! root block                (|block| bytes)
//! leaf correction word      (OUTPUTS_PER_LEAF values, packed via LeafArithmetic)
//! wildcard output flag + correlation (only if present)
//! wildcard input flag + offset share (only if present)
//! party flag                (1 byte: 1 for party 0, 0 for party 1)
//! ```
//!
//! A dealer writes both parties' keys back to back by calling
//! `write_key` twice; there is no length prefix around the pair, since each
//! key's fields are already fixed-size given its `depth` and output type.

use std::io::{Read, Write};

use crate::block::{Block, BLOCK_SIZE};
use crate::error::{Error, Result};
use crate::key::definition::{Key, WildcardOutputCorrelation};
use crate::node::Advice;
use crate::output::LeafArithmetic;

fn write_all(w: &mut impl Write, buf: &[u8]) -> Result<()> {
    w.write_all(buf)
        .map_err(|e| Error::transport(e.to_string(), 0))
}

fn read_exact(r: &mut impl Read, buf: &mut [u8]) -> Result<()> {
    r.read_exact(buf)
        .map_err(|e| Error::transport(e.to_string(), 0))
}

/// Writes one key in the order spec §6 fixes.
pub fn write_key<T: LeafArithmetic>(w: &mut impl Write, key: &Key<T>) -> Result<()> {
    for cw in &key.correction_words {
        write_all(w, &cw.to_le_bytes())?;
    }
    for byte in pack_advice(&key.advice) {
        write_all(w, &[byte])?;
    }
    write_all(w, &key.root.to_le_bytes())?;
    for block in T::pack_in_leaf(&key.leaf_correction) {
        write_all(w, &block.to_le_bytes())?;
    }
    match &key.wildcard_output {
        Some(corr) => {
            write_all(w, &[1u8])?;
            write_all(w, &(corr.slot as u64).to_le_bytes())?;
            for block in T::pack_in_leaf(&vec![corr.alpha_share.clone(); T::OUTPUTS_PER_LEAF]) {
                write_all(w, &block.to_le_bytes())?;
            }
            for block in T::pack_in_leaf(&vec![corr.combined_share.clone(); T::OUTPUTS_PER_LEAF]) {
                write_all(w, &block.to_le_bytes())?;
            }
        }
        None => write_all(w, &[0u8])?,
    }
    match key.input_offset_share {
        Some(share) => {
            write_all(w, &[1u8])?;
            write_all(w, &share.to_le_bytes())?;
        }
        None => write_all(w, &[0u8])?,
    }
    write_all(w, &[key.is_party_zero as u8])?;
    Ok(())
}

/// Reads one key back; `depth` must match the depth it was generated with
/// (the wire format carries no self-describing length).
pub fn read_key<T: LeafArithmetic>(r: &mut impl Read, depth: u32, domain_bits: u32) -> Result<Key<T>> {
    let mut correction_words = Vec::with_capacity(depth as usize);
    for _ in 0..depth {
        let mut buf = [0u8; BLOCK_SIZE];
        read_exact(r, &mut buf)?;
        correction_words.push(Block::from_le_bytes(&buf)?);
    }
    let mut advice = Vec::with_capacity(depth as usize);
    for _ in 0..depth {
        let mut byte = [0u8; 1];
        read_exact(r, &mut byte)?;
        advice.push(Advice::unpack(byte[0]));
    }
    let mut root_buf = [0u8; BLOCK_SIZE];
    read_exact(r, &mut root_buf)?;
    let root = Block::from_le_bytes(&root_buf)?;

    let mut leaf_blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
    for block in leaf_blocks.iter_mut() {
        let mut buf = [0u8; BLOCK_SIZE];
        read_exact(r, &mut buf)?;
        *block = Block::from_le_bytes(&buf)?;
    }
    let leaf_correction = T::unpack_from_leaf(&leaf_blocks);

    let mut flag = [0u8; 1];
    read_exact(r, &mut flag)?;
    let wildcard_output = if flag[0] != 0 {
        let mut slot_buf = [0u8; 8];
        read_exact(r, &mut slot_buf)?;
        let slot = u64::from_le_bytes(slot_buf) as usize;

        let mut alpha_blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
        for block in alpha_blocks.iter_mut() {
            let mut buf = [0u8; BLOCK_SIZE];
            read_exact(r, &mut buf)?;
            *block = Block::from_le_bytes(&buf)?;
        }
        let mut combined_blocks = vec![Block::ZERO; T::LEAF_BLOCKS];
        for block in combined_blocks.iter_mut() {
            let mut buf = [0u8; BLOCK_SIZE];
            read_exact(r, &mut buf)?;
            *block = Block::from_le_bytes(&buf)?;
        }
        let alpha_share = T::unpack_from_leaf(&alpha_blocks)
            .into_iter()
            .next()
            .expect("OUTPUTS_PER_LEAF >= 1");
        let combined_share = T::unpack_from_leaf(&combined_blocks)
            .into_iter()
            .next()
            .expect("OUTPUTS_PER_LEAF >= 1");
        Some(WildcardOutputCorrelation {
            slot,
            alpha_share,
            combined_share,
        })
    } else {
        None
    };

    read_exact(r, &mut flag)?;
    let input_offset_share = if flag[0] != 0 {
        let mut buf = [0u8; 8];
        read_exact(r, &mut buf)?;
        Some(u64::from_le_bytes(buf))
    } else {
        None
    };

    read_exact(r, &mut flag)?;
    let is_party_zero = flag[0] != 0;

    Ok(Key {
        root,
        correction_words,
        advice,
        depth,
        domain_bits,
        leaf_correction,
        wildcard_output,
        input_offset_share,
        bound_input_offset: None,
        is_party_zero,
    })
}

fn pack_advice(advice: &[Advice]) -> Vec<u8> {
    advice.iter().map(|a| a.pack()).collect()
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
    fn fixed_key_roundtrips_over_wire() {
        let prg = FixedKeyAesPrg::new();
        let mut rng = StdRng::seed_from_u64(11);
        let (k0, _k1) = gen::<_, Int32>(&prg, 10, Some(5), Some(Int32(9)), &mut rng).unwrap();

        let mut buf = Vec::new();
        write_key(&mut buf, &k0).unwrap();

        let mut cursor = &buf[..];
        let read_back: Key<Int32> = read_key(&mut cursor, k0.depth(), k0.domain_bits()).unwrap();

        assert_eq!(read_back.root(), k0.root());
        assert_eq!(read_back.correction_words(), k0.correction_words());
        assert_eq!(read_back.advice(), k0.advice());
        assert_eq!(read_back.leaf_correction(), k0.leaf_correction());
        assert_eq!(read_back.is_party_zero(), k0.is_party_zero());
    }

    #[test]
    fn wildcard_output_key_roundtrips_over_wire() {
        let prg = FixedKeyAesPrg::new();
        let mut rng = StdRng::seed_from_u64(12);
        let (k0, _k1) = gen::<_, Int32>(&prg, 10, Some(5), None, &mut rng).unwrap();
        assert!(k0.is_output_wildcard_pending());

        let mut buf = Vec::new();
        write_key(&mut buf, &k0).unwrap();
        let mut cursor = &buf[..];
        let read_back: Key<Int32> = read_key(&mut cursor, k0.depth(), k0.domain_bits()).unwrap();
        assert!(read_back.is_output_wildcard_pending());
    }
}
