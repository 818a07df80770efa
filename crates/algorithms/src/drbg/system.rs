//! Entropy-backed generator that reseeds itself

use log::{debug, warn};
use tpm2crypt_api::FailureCode;
use tpm2crypt_params::utils::drbg::DRBG_SEED_SIZE_BYTES;
use zeroize::Zeroize;

use super::ctr::{CtrDrbg, Seed};
use super::entropy::EntropySource;
use super::{DrbgConfig, RandomSource};
use crate::error::{Error, Result};

/// The instance's main generator
///
/// When the reseed interval is reached the next request pulls fresh entropy
/// and carries on instead of failing.
pub struct SystemDrbg<S: EntropySource> {
    drbg: CtrDrbg,
    source: S,
}

#[track_caller]
fn draw_seed<S: EntropySource>(source: &mut S) -> Result<Seed> {
    let mut seed = [0u8; DRBG_SEED_SIZE_BYTES];
    let got = source.get_entropy(&mut seed)?;
    if got != DRBG_SEED_SIZE_BYTES {
        seed.zeroize();
        return Err(Error::fatal(FailureCode::Entropy));
    }
    Ok(seed)
}

impl<S: EntropySource> SystemDrbg<S> {
    /// Uninstantiated generator over `source`
    pub fn new(source: S, config: DrbgConfig) -> Self {
        Self {
            drbg: CtrDrbg::zeroed(config),
            source,
        }
    }

    /// Instantiate from `source` with an optional personalization string
    pub fn instantiate(source: S, personalization: &[u8], config: DrbgConfig) -> Result<Self> {
        let mut drbg = Self::new(source, config);
        drbg.reinstantiate(personalization)?;
        Ok(drbg)
    }

    /// Wipe the state, signal a reset to the source and seed afresh
    ///
    /// Limits that fail [`DrbgConfig::validate`] leave the generator unusable
    /// and are fatal.
    #[track_caller]
    pub fn reinstantiate(&mut self, personalization: &[u8]) -> Result<()> {
        self.drbg.uninstantiate();
        if let Err(e) = self.drbg.config().validate() {
            warn!("refusing DRBG limits: {}", e);
            return Err(Error::fatal(FailureCode::Parameter));
        }
        self.source.get_entropy(&mut [])?;
        let mut seed = draw_seed(&mut self.source)?;
        self.drbg = CtrDrbg::instantiate_with_config(&seed, personalization, *self.drbg.config());
        seed.zeroize();
        Ok(())
    }

    /// True between instantiation and [`SystemDrbg::uninstantiate`]
    pub fn is_instantiated(&self) -> bool {
        self.drbg.reseed_counter() != 0
    }

    /// Mix fresh entropy and `additional` into the state
    pub fn reseed(&mut self, additional: &[u8]) -> Result<()> {
        let mut seed = draw_seed(&mut self.source)?;
        self.drbg.reseed(&seed, additional);
        seed.zeroize();
        Ok(())
    }

    /// Up to one request's worth of output, reseeding first if due
    #[track_caller]
    pub fn generate(&mut self, out: &mut [u8]) -> Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if !self.is_instantiated() {
            return Err(Error::fatal(FailureCode::Internal));
        }
        if self.drbg.needs_reseed() {
            debug!(
                "reseed interval reached after {} requests",
                self.drbg.config().reseed_interval
            );
            self.reseed(&[])?;
        }
        self.drbg.generate(out)
    }

    /// Requests since the last (re)seed, plus one
    pub fn reseed_counter(&self) -> u64 {
        self.drbg.reseed_counter()
    }

    /// Wipe the generator state; the entropy source is kept
    pub fn uninstantiate(&mut self) {
        self.drbg.uninstantiate();
    }

    /// Entropy source behind this generator
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: EntropySource> RandomSource for SystemDrbg<S> {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        let mut done = 0;
        while done < out.len() {
            done += self.generate(&mut out[done..])?;
        }
        Ok(())
    }
}

impl<S: EntropySource> core::fmt::Debug for SystemDrbg<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SystemDrbg").field("drbg", &self.drbg).finish_non_exhaustive()
    }
}
