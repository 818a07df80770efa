//! Runtime configuration of an engine instance

use tpm2crypt_algorithms::drbg::DrbgConfig;

/// Personalization string used when none is configured
pub const DEFAULT_PERSONALIZATION: &[u8] = b"tpm2crypt engine";

/// Knobs for [`CryptoEngine`](crate::CryptoEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Limits of the instance DRBG
    pub drbg: DrbgConfig,
    /// Personalization string mixed into every (re)instantiation
    pub personalization: Vec<u8>,
    /// Run the power-on self tests at startup and reset
    pub run_self_tests: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            drbg: DrbgConfig::default(),
            personalization: DEFAULT_PERSONALIZATION.to_vec(),
            run_self_tests: true,
        }
    }
}

impl EngineConfig {
    /// Replace the personalization string
    pub fn with_personalization(mut self, personalization: &[u8]) -> Self {
        self.personalization = personalization.to_vec();
        self
    }

    /// Replace the DRBG limits
    pub fn with_drbg(mut self, drbg: DrbgConfig) -> Self {
        self.drbg = drbg;
        self
    }

    /// Skip the power-on self tests
    pub fn without_self_tests(mut self) -> Self {
        self.run_self_tests = false;
        self
    }
}
