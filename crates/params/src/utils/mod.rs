//! Constant values shared by the hash, block cipher and DRBG code

pub mod drbg;
pub mod hash;
pub mod symmetric;
