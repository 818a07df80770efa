//! Entropy input with a continuous health test

use log::warn;
use rand::RngCore;
use tpm2crypt_api::FailureCode;
use tpm2crypt_internal::ct_eq;
use tpm2crypt_params::utils::drbg::ENTROPY_BLOCK_SIZE;
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Source of full-entropy bytes
///
/// A zero-length request is a reset signal and returns `Ok(0)`. Any failure
/// is fatal: the source is treated as broken for the rest of the session.
pub trait EntropySource {
    /// Fill `out` and return the number of bytes written
    fn get_entropy(&mut self, out: &mut [u8]) -> Result<usize>;
}

impl<T: EntropySource + ?Sized> EntropySource for &mut T {
    fn get_entropy(&mut self, out: &mut [u8]) -> Result<usize> {
        (**self).get_entropy(out)
    }
}

/// Wraps a raw generator with the continuous RNG test
///
/// Output is drawn in 8-byte blocks and each block is compared with the one
/// before it; a repeat marks the source failed permanently. The first
/// request after construction or a reset draws one extra block to prime
/// the comparison.
pub struct ContinuousEntropy<R: RngCore> {
    rng: R,
    last: [u8; ENTROPY_BLOCK_SIZE],
    primed: bool,
    failed: bool,
}

impl<R: RngCore> ContinuousEntropy<R> {
    /// Wrap `rng`
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            last: [0; ENTROPY_BLOCK_SIZE],
            primed: false,
            failed: false,
        }
    }

    /// True once the continuous test has tripped
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    #[track_caller]
    fn fail(&mut self, why: &str) -> Error {
        warn!("entropy source failed: {}", why);
        self.failed = true;
        Error::fatal(FailureCode::Entropy)
    }

    #[track_caller]
    fn next_block(&mut self) -> Result<[u8; ENTROPY_BLOCK_SIZE]> {
        let mut block = [0u8; ENTROPY_BLOCK_SIZE];
        if self.rng.try_fill_bytes(&mut block).is_err() {
            return Err(self.fail("generator error"));
        }
        if self.primed && ct_eq(&block, &self.last) {
            block.zeroize();
            return Err(self.fail("repeated block"));
        }
        self.last = block;
        self.primed = true;
        Ok(block)
    }
}

impl<R: RngCore> EntropySource for ContinuousEntropy<R> {
    #[track_caller]
    fn get_entropy(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.failed {
            return Err(Error::fatal(FailureCode::Entropy));
        }
        if out.is_empty() {
            self.primed = false;
            self.last.zeroize();
            return Ok(0);
        }
        if !self.primed {
            self.next_block()?.zeroize();
        }
        for chunk in out.chunks_mut(ENTROPY_BLOCK_SIZE) {
            let mut block = self.next_block()?;
            chunk.copy_from_slice(&block[..chunk.len()]);
            block.zeroize();
        }
        Ok(out.len())
    }
}

impl<R: RngCore> Drop for ContinuousEntropy<R> {
    fn drop(&mut self) {
        self.last.zeroize();
    }
}

impl<R: RngCore> core::fmt::Debug for ContinuousEntropy<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContinuousEntropy")
            .field("primed", &self.primed)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}
