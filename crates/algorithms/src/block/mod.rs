//! Block ciphers
//!
//! Only the forward direction of AES-256 is needed: the CTR-DRBG and its
//! derivation function never decrypt.

pub mod aes;

pub use aes::Aes256;
