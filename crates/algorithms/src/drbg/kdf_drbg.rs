//! KDFa output exposed as a random stream

use tpm2crypt_api::HashAlg;
use tpm2crypt_common::SecretVec;

use super::RandomSource;
use crate::error::{Error, Result};
use crate::kdf::kdfa_block;

/// Deterministic stream `KDFa(hash, seed, label, context, limit)`
///
/// Bytes come out in the order KDFa would produce them for a single call
/// with `limit_bits` of output, so the stream can stand in for one large
/// derivation consumed piecemeal. Asking for more than the limit is an error.
pub struct KdfDrbg {
    hash: HashAlg,
    seed: SecretVec,
    label: Vec<u8>,
    context: Vec<u8>,
    limit_bits: u32,
    counter: u32,
    produced: u64,
    block: SecretVec,
    used: usize,
}

impl KdfDrbg {
    /// Start a stream of at most `limit_bits` bits
    pub fn new(hash: HashAlg, seed: &[u8], label: &[u8], context: &[u8], limit_bits: u32) -> Self {
        Self {
            hash,
            seed: SecretVec::from_slice(seed),
            label: label.to_vec(),
            context: context.to_vec(),
            limit_bits,
            counter: 0,
            produced: 0,
            block: SecretVec::zeroed(0),
            used: 0,
        }
    }

    /// Bits still available
    pub fn remaining_bits(&self) -> u64 {
        u64::from(self.limit_bits).saturating_sub(self.produced * 8)
    }
}

impl RandomSource for KdfDrbg {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        if (out.len() as u64) * 8 > self.remaining_bits() {
            return Err(Error::param("out", "request exceeds the stream's bit limit"));
        }
        let mut done = 0;
        while done < out.len() {
            if self.used == self.block.len() {
                self.counter += 1;
                self.block = SecretVec::new(kdfa_block(
                    self.hash,
                    self.seed.as_slice(),
                    &self.label,
                    &self.context,
                    &[],
                    self.limit_bits,
                    self.counter,
                )?);
                self.used = 0;
            }
            let take = (self.block.len() - self.used).min(out.len() - done);
            out[done..done + take]
                .copy_from_slice(&self.block.as_slice()[self.used..self.used + take]);
            self.used += take;
            done += take;
        }
        self.produced += out.len() as u64;
        Ok(())
    }
}

impl core::fmt::Debug for KdfDrbg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdfDrbg")
            .field("hash", &self.hash)
            .field("limit_bits", &self.limit_bits)
            .field("produced", &self.produced)
            .finish_non_exhaustive()
    }
}
