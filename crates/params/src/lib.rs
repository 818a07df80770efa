//! Constant values for tpm2crypt
//!
//! Library-neutral tables: curve domain parameters stored as big-endian
//! bytes, digest sizes, and the limits that size the DRBG, the RSA code and
//! the private-exponent cache. Nothing in here depends on a math backend.

#![no_std]

pub mod traditional;
pub mod utils;
