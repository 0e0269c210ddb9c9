//! Fixed-key AES-128 realization of the PRG (spec §4.1): the
//! Matyas–Meyer–Oseas-style whitening `AES_k(seed XOR pos) XOR seed` under a
//! process-wide fixed key.

use once_cell::sync::Lazy;
use openssl::symm::{Cipher, Crypter, Mode};

use super::definition::{Prg, SecurePrg};
use crate::block::{Block, BLOCK_SIZE};

/// The process-wide AES-128 key schedule (spec §5, §9). Initialized once on
/// first use; correctness of the PRG relies on the seed, not on secrecy of
/// this constant, so it may be shared across every instance in the process.
static FIXED_KEY: Lazy<[u8; 16]> = Lazy::new(|| *b"dpf-fixed-key-v1");

fn aes_ecb_permute(key: &[u8; 16], input: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let cipher = Cipher::aes_128_ecb();
    let mut crypter = Crypter::new(cipher, Mode::Encrypt, key, None)
        .expect("AES-128-ECB key schedule initialization cannot fail for a fixed 16-byte key");
    crypter.pad(false);
    let mut out = vec![0u8; BLOCK_SIZE + cipher.block_size()];
    let mut count = crypter
        .update(input, &mut out)
        .expect("single-block update into a sufficiently sized buffer cannot fail");
    count += crypter
        .finalize(&mut out[count..])
        .expect("finalize with padding disabled and exact block input cannot fail");
    out.truncate(count);
    let mut arr = [0u8; BLOCK_SIZE];
    arr.copy_from_slice(&out);
    arr
}

/// Fixed-key AES-128 PRG. Stateless; every instance shares [`FIXED_KEY`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedKeyAesPrg;

impl FixedKeyAesPrg {
    pub fn new() -> Self {
        FixedKeyAesPrg
    }
}

impl Prg for FixedKeyAesPrg {
    fn eval(&self, seed: &Block, position: u64) -> Block {
        let mut pos_bytes = [0u8; BLOCK_SIZE];
        pos_bytes[..8].copy_from_slice(&position.to_le_bytes());
        let pos_block = Block::from_bytes(pos_bytes);
        let whitened = *seed ^ pos_block;
        let permuted = aes_ecb_permute(&FIXED_KEY, whitened.as_bytes());
        Block::from_bytes(permuted) ^ *seed
    }
}

impl SecurePrg for FixedKeyAesPrg {}

#[cfg(any(test, feature = "testing"))]
use proptest::prelude::*;

#[cfg(any(test, feature = "testing"))]
impl Arbitrary for FixedKeyAesPrg {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        Just(FixedKeyAesPrg).boxed()
    }
}
