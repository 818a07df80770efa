//! CTR_DRBG core state machine

use log::debug;
use tpm2crypt_api::FailureCode;
use tpm2crypt_common::SecretBuffer;
use tpm2crypt_internal::ct_eq;
use tpm2crypt_params::utils::drbg::{
    DRBG_IV_SIZE_BYTES, DRBG_KEY_SIZE_BYTES, DRBG_SEED_SIZE_BYTES,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{DrbgConfig, RandomSource};
use crate::block::Aes256;
use crate::error::{Error, Result};

/// Seed material: exactly `seedlen` bytes
pub type Seed = [u8; DRBG_SEED_SIZE_BYTES];

/// AES-256 CTR_DRBG state
///
/// `reseed_counter` starts at 1 after instantiation and counts generate
/// calls; once it passes the configured interval [`CtrDrbg::generate`]
/// refuses with [`Error::ReseedRequired`] until the state is reseeded.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CtrDrbg {
    key: SecretBuffer<DRBG_KEY_SIZE_BYTES>,
    v: SecretBuffer<DRBG_IV_SIZE_BYTES>,
    reseed_counter: u64,
    last_block: SecretBuffer<DRBG_IV_SIZE_BYTES>,
    has_last_block: bool,
    #[zeroize(skip)]
    config: DrbgConfig,
}

fn xor_into(seed: &mut Seed, data: &[u8]) {
    for (s, d) in seed.iter_mut().zip(data) {
        *s ^= d;
    }
}

fn increment(v: &mut [u8]) {
    for byte in v.iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            break;
        }
    }
}

impl CtrDrbg {
    /// All-zero, uninstantiated state
    pub(crate) fn zeroed(config: DrbgConfig) -> Self {
        Self {
            key: SecretBuffer::zeroed(),
            v: SecretBuffer::zeroed(),
            reseed_counter: 0,
            last_block: SecretBuffer::zeroed(),
            has_last_block: false,
            config,
        }
    }

    /// Instantiate from full-entropy `entropy` and an optional
    /// personalization string (truncated to the seed length)
    pub fn instantiate(entropy: &Seed, personalization: &[u8]) -> Self {
        Self::instantiate_with_config(entropy, personalization, DrbgConfig::default())
    }

    /// [`CtrDrbg::instantiate`] with explicit limits
    pub fn instantiate_with_config(
        entropy: &Seed,
        personalization: &[u8],
        config: DrbgConfig,
    ) -> Self {
        let mut seed = *entropy;
        xor_into(&mut seed, personalization);
        let mut drbg = Self::zeroed(config);
        drbg.update(&seed);
        drbg.reseed_counter = 1;
        seed.zeroize();
        debug!("CTR_DRBG instantiated");
        drbg
    }

    /// Build from a seed already conditioned to `seedlen` bytes
    pub(crate) fn from_conditioned_seed(seed: &Seed, config: DrbgConfig) -> Self {
        let mut drbg = Self::zeroed(config);
        drbg.update(seed);
        drbg.reseed_counter = 1;
        drbg
    }

    /// Mix fresh entropy and optional additional input into the state
    pub fn reseed(&mut self, entropy: &Seed, additional: &[u8]) {
        let mut seed = *entropy;
        xor_into(&mut seed, additional);
        self.update(&seed);
        self.reseed_counter = 1;
        seed.zeroize();
        debug!("CTR_DRBG reseeded");
    }

    /// `CTR_DRBG_Update`
    fn update(&mut self, provided: &Seed) {
        let cipher = Aes256::new(self.key.as_array());
        let mut temp = [0u8; DRBG_SEED_SIZE_BYTES];
        for chunk in temp.chunks_exact_mut(DRBG_IV_SIZE_BYTES) {
            increment(self.v.as_mut_slice());
            let mut block = [0u8; DRBG_IV_SIZE_BYTES];
            block.copy_from_slice(self.v.as_slice());
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
            block.zeroize();
        }
        xor_into(&mut temp, provided);
        self.key
            .as_mut_slice()
            .copy_from_slice(&temp[..DRBG_KEY_SIZE_BYTES]);
        self.v
            .as_mut_slice()
            .copy_from_slice(&temp[DRBG_KEY_SIZE_BYTES..]);
        temp.zeroize();
    }

    /// Fill up to the per-request limit of `out` and return how many bytes
    /// were written
    ///
    /// A zero-length request writes nothing and leaves the state untouched.
    #[track_caller]
    pub fn generate(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        self.config.validate()?;
        if self.reseed_counter > self.config.reseed_interval {
            return Err(Error::ReseedRequired);
        }
        let n = out.len().min(self.config.max_bytes_per_request);
        let cipher = Aes256::new(self.key.as_array());
        for chunk in out[..n].chunks_mut(DRBG_IV_SIZE_BYTES) {
            increment(self.v.as_mut_slice());
            let mut block = [0u8; DRBG_IV_SIZE_BYTES];
            block.copy_from_slice(self.v.as_slice());
            cipher.encrypt_block(&mut block);
            if self.has_last_block && ct_eq(&block, self.last_block.as_slice()) {
                block.zeroize();
                return Err(Error::fatal(FailureCode::Entropy));
            }
            self.last_block.as_mut_slice().copy_from_slice(&block);
            self.has_last_block = true;
            chunk.copy_from_slice(&block[..chunk.len()]);
            block.zeroize();
        }
        self.update(&[0u8; DRBG_SEED_SIZE_BYTES]);
        self.reseed_counter += 1;
        Ok(n)
    }

    /// True once the reseed interval has been used up
    pub fn needs_reseed(&self) -> bool {
        self.reseed_counter > self.config.reseed_interval
    }

    /// Generate calls since the last (re)seed, plus one
    pub fn reseed_counter(&self) -> u64 {
        self.reseed_counter
    }

    /// Active limits
    pub fn config(&self) -> &DrbgConfig {
        &self.config
    }

    /// Wipe all state
    pub fn uninstantiate(&mut self) {
        self.key.zeroize();
        self.v.zeroize();
        self.last_block.zeroize();
        self.has_last_block = false;
        self.reseed_counter = 0;
        debug!("CTR_DRBG uninstantiated");
    }

    /// True when every secret field is zero
    pub fn is_zeroed(&self) -> bool {
        self.key.is_zeroed()
            && self.v.is_zeroed()
            && self.last_block.is_zeroed()
            && self.reseed_counter == 0
    }
}

impl RandomSource for CtrDrbg {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        let mut done = 0;
        while done < out.len() {
            done += self.generate(&mut out[done..])?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for CtrDrbg {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CtrDrbg")
            .field("reseed_counter", &self.reseed_counter)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
