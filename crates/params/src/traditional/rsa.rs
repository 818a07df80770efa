//! Constants for RSA algorithm

/// Largest supported modulus
pub const MAX_RSA_KEY_BITS: usize = 4096;

/// Largest supported modulus in bytes
pub const MAX_RSA_KEY_BYTES: usize = MAX_RSA_KEY_BITS / 8;

/// Smallest modulus accepted by key generation
pub const MIN_RSA_KEY_BITS: usize = 1024;

/// Default public exponent (65537); a TPM exponent of zero selects it
pub const RSA_DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// Number of entries in the private-exponent cache
pub const EXP_D_CACHE_SIZE: usize = 64;

/// Miller-Rabin rounds used by prime generation
pub const RSA_MILLER_RABIN_ROUNDS: usize = 8;

/// DER DigestInfo prefix for SHA-1 (RSASSA-PKCS1-v1_5)
pub const DIGEST_INFO_SHA1: &[u8] = &[
    0x30, 0x21, 0x30, 0x09, 0x06, 0x05, 0x2b, 0x0e, 0x03, 0x02, 0x1a, 0x05, 0x00, 0x04, 0x14,
];

/// DER DigestInfo prefix for SHA-256
pub const DIGEST_INFO_SHA256: &[u8] = &[
    0x30, 0x31, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
    0x05, 0x00, 0x04, 0x20,
];

/// DER DigestInfo prefix for SHA-384
pub const DIGEST_INFO_SHA384: &[u8] = &[
    0x30, 0x41, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02,
    0x05, 0x00, 0x04, 0x30,
];

/// DER DigestInfo prefix for SHA-512
pub const DIGEST_INFO_SHA512: &[u8] = &[
    0x30, 0x51, 0x30, 0x0d, 0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03,
    0x05, 0x00, 0x04, 0x40,
];
