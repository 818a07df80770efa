//! Reproducible generator instantiated from a stored seed

use tpm2crypt_common::SecretVec;
use tpm2crypt_params::utils::drbg::DRBG_SEED_SIZE_BYTES;
use zeroize::Zeroize;

use super::ctr::CtrDrbg;
use super::df::block_cipher_df;
use super::{DrbgConfig, RandomSource};
use crate::error::Result;

/// CTR_DRBG seeded through `Block_Cipher_df(seed || label || context)`
///
/// Two instances built from the same inputs produce the same stream. There
/// is no entropy source behind it: once the reseed interval is used up every
/// request fails with [`Error::ReseedRequired`](crate::error::Error::ReseedRequired).
#[derive(Debug, Clone)]
pub struct SeededDrbg {
    inner: CtrDrbg,
}

impl SeededDrbg {
    /// Instantiate with default limits
    pub fn new(seed: &[u8], label: &[u8], context: &[u8]) -> Self {
        Self::with_config(seed, label, context, DrbgConfig::default())
    }

    /// Instantiate with explicit limits
    pub fn with_config(seed: &[u8], label: &[u8], context: &[u8], config: DrbgConfig) -> Self {
        let mut input = SecretVec::new(Vec::with_capacity(
            seed.len() + label.len() + context.len(),
        ));
        input.extend_from_slice(seed);
        input.extend_from_slice(label);
        input.extend_from_slice(context);
        let conditioned = block_cipher_df(input.as_slice());
        let mut material = [0u8; DRBG_SEED_SIZE_BYTES];
        material.copy_from_slice(conditioned.as_slice());
        let inner = CtrDrbg::from_conditioned_seed(&material, config);
        material.zeroize();
        Self { inner }
    }

    /// Up to one request's worth of output; see [`CtrDrbg::generate`]
    pub fn generate(&mut self, out: &mut [u8]) -> Result<usize> {
        self.inner.generate(out)
    }

    /// Wipe the state
    pub fn uninstantiate(&mut self) {
        self.inner.uninstantiate();
    }
}

impl RandomSource for SeededDrbg {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        self.inner.fill(out)
    }
}
