//! Common implementations and shared functionality for tpm2crypt
//!
//! Secret-holding containers that wipe themselves when dropped. DRBG state,
//! cipher round keys, cached private exponents and intermediate key material
//! all live in one of these.

pub mod security;

// Re-export core security types
pub use security::{SecretBuffer, SecretVec};
