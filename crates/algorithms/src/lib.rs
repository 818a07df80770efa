//! Arithmetic core for the tpm2crypt library
//!
//! This crate holds everything below the signature and key-exchange
//! schemes:
//!
//! - [`bignum`]: fixed-capacity multi-precision integers
//! - [`math`]: the [`MathBackend`] abstraction with a native and a
//!   `num-bigint` implementation
//! - [`ec`]: the named-curve registry and Jacobian point arithmetic
//! - [`hash`], [`mac`], [`kdf`]: digests, HMAC, KDFa/KDFe and MGF1
//! - [`block`]: AES-256 encryption for the DRBG
//! - [`drbg`]: CTR_DRBG and its seeded, system and KDF-stream variants
//! - [`rsa`]: RSA primitives, padding, key generation and the
//!   private-exponent cache (feature `rsa`)
//!
//! Errors are reported through [`Error`]; any error for which
//! [`Error::is_fatal`] holds means the library must enter failure mode.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub use error::{validate, Error, Result};

pub mod bignum;
pub use bignum::BigNum;

pub mod math;
pub use math::{ExternalBackend, MathBackend, NativeBackend};

pub mod ec;
pub use ec::{EccCurve, EccPoint};

pub mod hash;
pub use hash::{digest, digest_parts, HashState};

pub mod mac;
pub use mac::{hmac, Hmac};

pub mod kdf;
pub use kdf::{kdfa, kdfe, mgf1};

pub mod block;
pub use block::Aes256;

pub mod drbg;
pub use drbg::{
    CtrDrbg, DrbgConfig, KdfDrbg, RandomSource, RngSource, SeededDrbg, SystemDrbg,
};

#[cfg(feature = "rsa")]
pub mod rsa;
#[cfg(feature = "rsa")]
pub use rsa::{ExpDCache, RsaPrivateKey, RsaPublicKey};
