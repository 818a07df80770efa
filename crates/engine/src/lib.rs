//! The tpm2crypt instance
//!
//! A software TPM owns one [`CryptoEngine`]. It holds the instance DRBG and
//! its entropy source, the RSA private-exponent cache, the ECDAA commit
//! state and the failure-mode latch, and exposes the ECC, RSA and random
//! number operations a command layer needs. Each operation runs through
//! [`CryptoEngine::execute`], the one place fatal conditions are turned into
//! failure mode.
//!
//! ```ignore
//! let mut engine = CryptoEngine::startup(
//!     NativeBackend::new(),
//!     ContinuousEntropy::new(rand::rngs::OsRng),
//!     EngineConfig::default(),
//! );
//! let (d, q) = engine.ecc_create_key(CurveId::NIST_P256)?;
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod failure;

pub use config::EngineConfig;
pub use engine::{CommitOutput, CryptoEngine, EngineState};
pub use failure::FailureMode;
