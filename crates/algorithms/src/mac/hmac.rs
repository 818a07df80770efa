//! HMAC (RFC 2104 / FIPS 198-1) over the run-time selected digest

use ::hmac::{Mac, SimpleHmac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use tpm2crypt_api::{FailureCode, HashAlg};

use crate::error::{Error, Result};

/// Keyed HMAC state
#[derive(Clone)]
pub enum Hmac {
    /// HMAC-SHA-1
    Sha1(SimpleHmac<Sha1>),
    /// HMAC-SHA-256
    Sha256(SimpleHmac<Sha256>),
    /// HMAC-SHA-384
    Sha384(SimpleHmac<Sha384>),
    /// HMAC-SHA-512
    Sha512(SimpleHmac<Sha512>),
}

// HMAC accepts keys of any length; a rejection means the library is broken
macro_rules! keyed {
    ($variant:ident, $key:expr) => {
        SimpleHmac::new_from_slice($key)
            .map(Hmac::$variant)
            .map_err(|_| Error::fatal(FailureCode::Internal))
    };
}

impl Hmac {
    /// Start a MAC under `key`
    #[track_caller]
    pub fn new(alg: HashAlg, key: &[u8]) -> Result<Self> {
        match alg {
            HashAlg::Sha1 => keyed!(Sha1, key),
            HashAlg::Sha256 => keyed!(Sha256, key),
            HashAlg::Sha384 => keyed!(Sha384, key),
            HashAlg::Sha512 => keyed!(Sha512, key),
        }
    }

    /// Absorb `data`
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hmac::Sha1(m) => m.update(data),
            Hmac::Sha256(m) => m.update(data),
            Hmac::Sha384(m) => m.update(data),
            Hmac::Sha512(m) => m.update(data),
        }
    }

    /// Absorb a 32-bit big-endian counter or length
    pub fn update_u32(&mut self, value: u32) {
        self.update(&value.to_be_bytes());
    }

    /// Finish and return the tag
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Hmac::Sha1(m) => m.finalize().into_bytes().to_vec(),
            Hmac::Sha256(m) => m.finalize().into_bytes().to_vec(),
            Hmac::Sha384(m) => m.finalize().into_bytes().to_vec(),
            Hmac::Sha512(m) => m.finalize().into_bytes().to_vec(),
        }
    }
}

/// One-shot HMAC
pub fn hmac(alg: HashAlg, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::new(alg, key)?;
    mac.update(data);
    Ok(mac.finalize())
}
