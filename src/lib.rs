//! # tpm2crypt
//!
//! The arithmetic core of a software TPM 2.0: multi-precision integers behind
//! a pluggable math backend, named-curve ECC, the TPM signature and
//! key-exchange schemes, CTR_DRBG and RSA with a private-exponent cache.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tpm2crypt = "0.4"
//! ```
//!
//! ## Features
//!
//! - `rsa` (default): `ModExp`, RSA primitives and the exponent cache
//! - `sign` (default): ECDSA, EC-Schnorr, ECDAA and SM2 signatures
//! - `exchange` (default): ECDH, ECMQV and SM2 key exchange
//! - `engine` (default): the instance with its failure-mode boundary
//! - `serde`: serde derives on the identifier types
//! - `full`: all features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`tpm2crypt-api`]: outcome codes, identifiers and wire buffers
//! - [`tpm2crypt-algorithms`]: integers, backends, ECC, hashing, DRBG, RSA
//! - [`tpm2crypt-sign`]: ECC signature schemes
//! - [`tpm2crypt-exchange`]: ECC key exchange
//! - [`tpm2crypt-engine`]: the crypto instance

#![forbid(unsafe_code)]

// Core re-exports (always available)
pub use tpm2crypt_algorithms as algorithms;
pub use tpm2crypt_api as api;
pub use tpm2crypt_common as common;
pub use tpm2crypt_internal as internal;
pub use tpm2crypt_params as params;

// Feature-gated re-exports
#[cfg(feature = "sign")]
pub use tpm2crypt_sign as sign;

#[cfg(feature = "exchange")]
pub use tpm2crypt_exchange as exchange;

#[cfg(feature = "engine")]
pub use tpm2crypt_engine as engine;

/// Common imports for tpm2crypt users
pub mod prelude {
    // Outcome types
    pub use crate::api::{Error, FailureCode, Result};

    // Identifiers and wire types
    pub use crate::api::{
        CurveId, EccParameter, EccPoint, EccSignature, HashAlg, KeyExchangeScheme, RsaScheme,
        SigScheme, Tpm2b,
    };

    // Backends and randomness
    pub use crate::algorithms::drbg::{
        ContinuousEntropy, DrbgConfig, EntropySource, RandomSource, SeededDrbg,
    };
    pub use crate::algorithms::{ExternalBackend, MathBackend, NativeBackend};

    // Security types
    pub use crate::common::{SecretBuffer, SecretVec};

    #[cfg(feature = "rsa")]
    pub use crate::algorithms::rsa::{ExpDCache, RsaPrivateKey, RsaPublicKey};

    #[cfg(feature = "engine")]
    pub use crate::engine::{CryptoEngine, EngineConfig};
}
