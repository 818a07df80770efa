//! Algorithm, scheme and curve identifiers
//!
//! Scheme and curve identifiers are thin wrappers over the TPM_ALG_ID and
//! TPM_ECC_CURVE numbering so that values arriving from the command layer
//! can be carried unchanged and rejected at the point of use.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use tpm2crypt_params::utils::hash::{
    SHA1_OUTPUT_SIZE, SHA256_BLOCK_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_BLOCK_SIZE, SHA512_OUTPUT_SIZE,
};

/// Hash algorithms the core can compute
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlg {
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlg {
    /// Every supported hash, in TPM_ALG_ID order
    pub const ALL: [HashAlg; 4] = [HashAlg::Sha1, HashAlg::Sha256, HashAlg::Sha384, HashAlg::Sha512];

    /// Output size in bytes
    pub const fn digest_size(self) -> usize {
        match self {
            HashAlg::Sha1 => SHA1_OUTPUT_SIZE,
            HashAlg::Sha256 => SHA256_OUTPUT_SIZE,
            HashAlg::Sha384 => SHA384_OUTPUT_SIZE,
            HashAlg::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }

    /// Internal block size in bytes
    pub const fn block_size(self) -> usize {
        match self {
            HashAlg::Sha1 | HashAlg::Sha256 => SHA256_BLOCK_SIZE,
            HashAlg::Sha384 | HashAlg::Sha512 => SHA512_BLOCK_SIZE,
        }
    }

    /// TPM_ALG_ID value
    pub const fn tpm_alg(self) -> u16 {
        match self {
            HashAlg::Sha1 => 0x0004,
            HashAlg::Sha256 => 0x000B,
            HashAlg::Sha384 => 0x000C,
            HashAlg::Sha512 => 0x000D,
        }
    }

    /// Map a TPM_ALG_ID onto a supported hash
    pub fn from_tpm_alg(alg: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|h| h.tpm_alg() == alg)
    }
}

/// TPM_ECC_CURVE identifier
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub u16);

impl CurveId {
    /// NIST P-192
    pub const NIST_P192: CurveId = CurveId(0x0001);
    /// NIST P-224
    pub const NIST_P224: CurveId = CurveId(0x0002);
    /// NIST P-256
    pub const NIST_P256: CurveId = CurveId(0x0003);
    /// NIST P-384
    pub const NIST_P384: CurveId = CurveId(0x0004);
    /// NIST P-521
    pub const NIST_P521: CurveId = CurveId(0x0005);
    /// Barreto-Naehrig 256-bit pairing-friendly curve
    pub const BN_P256: CurveId = CurveId(0x0010);
    /// SM2 recommended 256-bit curve
    pub const SM2_P256: CurveId = CurveId(0x0020);
}

/// Signature scheme (TPM_ALG_ID numbering)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigScheme(pub u16);

impl SigScheme {
    /// RSASSA-PKCS1-v1_5
    pub const RSASSA: SigScheme = SigScheme(0x0014);
    /// RSASSA-PSS
    pub const RSAPSS: SigScheme = SigScheme(0x0016);
    /// ECDSA
    pub const ECDSA: SigScheme = SigScheme(0x0018);
    /// ECDAA
    pub const ECDAA: SigScheme = SigScheme(0x001A);
    /// SM2
    pub const SM2: SigScheme = SigScheme(0x001B);
    /// EC-Schnorr
    pub const EC_SCHNORR: SigScheme = SigScheme(0x001C);
}

/// Two-phase key exchange scheme (TPM_ALG_ID numbering)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyExchangeScheme(pub u16);

impl KeyExchangeScheme {
    /// Full unified model ECDH, C(2e, 2s)
    pub const ECDH: KeyExchangeScheme = KeyExchangeScheme(0x0019);
    /// SM2 key exchange
    pub const SM2: KeyExchangeScheme = KeyExchangeScheme(0x001B);
    /// ECMQV, C(2e, 2s)
    pub const ECMQV: KeyExchangeScheme = KeyExchangeScheme(0x001D);
}

/// RSA padding scheme (TPM_ALG_ID numbering)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsaScheme(pub u16);

impl RsaScheme {
    /// No padding; raw modular exponentiation
    pub const NULL: RsaScheme = RsaScheme(0x0010);
    /// RSASSA-PKCS1-v1_5
    pub const RSASSA: RsaScheme = RsaScheme(0x0014);
    /// RSAES-PKCS1-v1_5
    pub const RSAES: RsaScheme = RsaScheme(0x0015);
    /// RSASSA-PSS
    pub const RSAPSS: RsaScheme = RsaScheme(0x0016);
    /// RSAES-OAEP
    pub const OAEP: RsaScheme = RsaScheme(0x0017);
}
