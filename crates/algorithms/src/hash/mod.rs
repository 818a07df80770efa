//! Message digests selected at run time by [`HashAlg`]
//!
//! The TPM picks its hash from a command parameter, so callers hold a
//! [`HashState`] rather than a concrete digest type.

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tpm2crypt_api::HashAlg;

/// Running digest for one of the supported algorithms
#[derive(Clone)]
pub enum HashState {
    /// SHA-1
    Sha1(Sha1),
    /// SHA-256
    Sha256(Sha256),
    /// SHA-384
    Sha384(Sha384),
    /// SHA-512
    Sha512(Sha512),
}

impl HashState {
    /// Start a digest
    pub fn new(alg: HashAlg) -> Self {
        match alg {
            HashAlg::Sha1 => HashState::Sha1(Sha1::new()),
            HashAlg::Sha256 => HashState::Sha256(Sha256::new()),
            HashAlg::Sha384 => HashState::Sha384(Sha384::new()),
            HashAlg::Sha512 => HashState::Sha512(Sha512::new()),
        }
    }

    /// Algorithm of this digest
    pub fn algorithm(&self) -> HashAlg {
        match self {
            HashState::Sha1(_) => HashAlg::Sha1,
            HashState::Sha256(_) => HashAlg::Sha256,
            HashState::Sha384(_) => HashAlg::Sha384,
            HashState::Sha512(_) => HashAlg::Sha512,
        }
    }

    /// Absorb `data`
    pub fn update(&mut self, data: &[u8]) {
        match self {
            HashState::Sha1(h) => h.update(data),
            HashState::Sha256(h) => h.update(data),
            HashState::Sha384(h) => h.update(data),
            HashState::Sha512(h) => h.update(data),
        }
    }

    /// Absorb a 32-bit big-endian counter or length
    pub fn update_u32(&mut self, value: u32) {
        self.update(&value.to_be_bytes());
    }

    /// Finish and return the digest
    pub fn finalize(self) -> Vec<u8> {
        match self {
            HashState::Sha1(h) => h.finalize().to_vec(),
            HashState::Sha256(h) => h.finalize().to_vec(),
            HashState::Sha384(h) => h.finalize().to_vec(),
            HashState::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// One-shot digest of `data`
pub fn digest(alg: HashAlg, data: &[u8]) -> Vec<u8> {
    let mut h = HashState::new(alg);
    h.update(data);
    h.finalize()
}

/// One-shot digest over several slices in order
pub fn digest_parts(alg: HashAlg, parts: &[&[u8]]) -> Vec<u8> {
    let mut h = HashState::new(alg);
    for part in parts {
        h.update(part);
    }
    h.finalize()
}
