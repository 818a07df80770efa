//! Deterministic random bit generators
//!
//! [`CtrDrbg`] is the SP 800-90A CTR_DRBG over AES-256 without a derivation
//! function on the entropy path. It is wrapped three ways:
//!
//! * [`SystemDrbg`] draws entropy from an [`EntropySource`] and reseeds
//!   itself when the reseed interval is reached
//! * [`SeededDrbg`] is built from an explicit seed, label and context
//!   through `Block_Cipher_df` and never touches entropy
//! * [`KdfDrbg`] streams KDFa output up to a fixed bit limit
//!
//! Consumers take any of them through [`RandomSource`].

use rand::{CryptoRng, RngCore};
use tpm2crypt_api::FailureCode;
use tpm2crypt_params::utils::drbg::{
    CTR_DRBG_MAX_BYTES_PER_REQUEST, CTR_DRBG_MAX_REQUESTS_PER_RESEED,
};

use crate::error::{validate, Error, Result};

mod ctr;
mod df;
mod entropy;
mod kdf_drbg;
mod seeded;
mod system;

pub use ctr::{CtrDrbg, Seed};
pub use df::block_cipher_df;
pub use entropy::{ContinuousEntropy, EntropySource};
pub use kdf_drbg::KdfDrbg;
pub use seeded::SeededDrbg;
pub use self_test::self_test;
pub use system::SystemDrbg;

/// Anything that can fill a buffer with random bytes
pub trait RandomSource {
    /// Fill all of `out`
    fn fill(&mut self, out: &mut [u8]) -> Result<()>;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        (**self).fill(out)
    }
}

/// [`RandomSource`] over a `rand` generator
///
/// Used by tests and by callers that already hold a vetted generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: RngCore + CryptoRng> RandomSource for RngSource<R> {
    #[track_caller]
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(out)
            .map_err(|_| Error::fatal(FailureCode::Entropy))
    }
}

/// Runtime limits of a CTR_DRBG instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrbgConfig {
    /// Generate calls allowed between reseeds
    pub reseed_interval: u64,
    /// Largest single generate request in bytes
    pub max_bytes_per_request: usize,
}

impl Default for DrbgConfig {
    fn default() -> Self {
        Self {
            reseed_interval: CTR_DRBG_MAX_REQUESTS_PER_RESEED,
            max_bytes_per_request: CTR_DRBG_MAX_BYTES_PER_REQUEST,
        }
    }
}

impl DrbgConfig {
    /// Check both limits are non-zero and within SP 800-90A bounds
    pub fn validate(&self) -> Result<()> {
        validate::parameter(
            (1..=CTR_DRBG_MAX_REQUESTS_PER_RESEED).contains(&self.reseed_interval),
            "reseed_interval",
            "must be between 1 and 2^48",
        )?;
        validate::parameter(
            (1..=CTR_DRBG_MAX_BYTES_PER_REQUEST).contains(&self.max_bytes_per_request),
            "max_bytes_per_request",
            "must be between 1 and 2^16",
        )
    }
}
