//! Constants for symmetric encryption algorithms

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// Number of rounds for AES-256
pub const AES256_ROUNDS: usize = 14;
