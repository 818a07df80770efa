//! Public API types for the tpm2crypt library
//!
//! This crate is the boundary the surrounding TPM command layer sees: the
//! closed set of outcome kinds it maps onto TPM response codes, the algorithm
//! and curve identifiers, and the size-prefixed big-endian buffers every
//! integer and point crosses the boundary in.

pub mod error;
pub mod ids;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, FailureCode, Result};
pub use ids::{CurveId, HashAlg, KeyExchangeScheme, RsaScheme, SigScheme};
pub use types::{EccParameter, EccPoint, EccSignature, RsaBuffer, Tpm2b};
