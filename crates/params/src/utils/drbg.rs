//! Constants for the AES-256 CTR_DRBG (SP 800-90A, no derivation function
//! on the entropy path)

use super::symmetric::{AES256_KEY_SIZE, AES_BLOCK_SIZE};

/// Size of the DRBG key
pub const DRBG_KEY_SIZE_BYTES: usize = AES256_KEY_SIZE;

/// Size of the DRBG counter block `V`
pub const DRBG_IV_SIZE_BYTES: usize = AES_BLOCK_SIZE;

/// `seedlen`: key plus counter block
pub const DRBG_SEED_SIZE_BYTES: usize = DRBG_KEY_SIZE_BYTES + DRBG_IV_SIZE_BYTES;

/// Number of generate requests allowed between reseeds
pub const CTR_DRBG_MAX_REQUESTS_PER_RESEED: u64 = 1 << 48;

/// Largest number of bytes returned by a single generate call
pub const CTR_DRBG_MAX_BYTES_PER_REQUEST: usize = 1 << 16;

/// Granularity of the entropy source's continuous test
pub const ENTROPY_BLOCK_SIZE: usize = 8;

/// Size of the ECDAA commit-counter bitmap in bytes
pub const COMMIT_ARRAY_SIZE: usize = 16;

/// Mask applied to the commit counter to index the bitmap
pub const COMMIT_INDEX_MASK: u16 = (COMMIT_ARRAY_SIZE * 8 - 1) as u16;
