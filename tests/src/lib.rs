//! Shared fixtures and helpers for the tpm2crypt integration tests

pub mod fixtures;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tpm2crypt_algorithms::drbg::{ContinuousEntropy, RandomSource, RngSource};
use tpm2crypt_algorithms::error::Result;
use tpm2crypt_algorithms::rsa::{RsaPrivateKey, RsaPublicKey};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::{CurveId, EccPoint, HashAlg};
use tpm2crypt_engine::{CryptoEngine, EngineConfig};

/// Message whose digest the RSA and ECDSA fixtures sign
pub const MESSAGE: &[u8] = b"tpm2crypt known answer message";

/// Plaintext carried by the RSA encryption fixtures
pub const PLAINTEXT: &[u8] = b"secret-0123456789";

/// OAEP label, including its terminating zero
pub const LABEL: &[u8] = b"TPM2CRYPT\x00";

/// Public exponent of the fixture RSA key
pub const RSA_EXPONENT: u32 = 65537;

/// Deterministic byte stream `1, 2, ..., 251, 1, 2, ...`
///
/// It never yields a zero byte, so PKCS#1 v1.5 padding consumes exactly one
/// stream byte per padding byte.
#[derive(Debug, Default, Clone)]
pub struct StreamSource {
    position: usize,
}

impl StreamSource {
    /// A stream starting at its first byte
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes handed out so far
    pub fn position(&self) -> usize {
        self.position
    }
}

impl RandomSource for StreamSource {
    fn fill(&mut self, out: &mut [u8]) -> Result<()> {
        for byte in out.iter_mut() {
            *byte = (self.position % 251) as u8 + 1;
            self.position += 1;
        }
        Ok(())
    }
}

/// Decode a hex fixture
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("fixture is valid hex")
}

/// Digest of [`MESSAGE`] under `hash`
pub fn message_digest(hash: HashAlg) -> Vec<u8> {
    tpm2crypt_algorithms::digest(hash, MESSAGE)
}

/// Public half of the 2048-bit fixture key
pub fn rsa_2048_public() -> RsaPublicKey {
    RsaPublicKey::new(&unhex(fixtures::RSA_2048_N), RSA_EXPONENT).expect("fixture modulus")
}

/// The 2048-bit fixture key from all of its parts
pub fn rsa_2048_private<B: MathBackend + ?Sized>(b: &B) -> RsaPrivateKey {
    RsaPrivateKey::from_parts(
        b,
        rsa_2048_public(),
        &unhex(fixtures::RSA_2048_P),
        &unhex(fixtures::RSA_2048_Q),
        &unhex(fixtures::RSA_2048_D),
    )
    .expect("fixture key is consistent")
}

/// Fixture ECDSA key pair for `curve`: `(d, Q)`
pub fn ecdsa_key(curve: CurveId) -> (Vec<u8>, EccPoint) {
    let (d, x, y) = match curve {
        CurveId::NIST_P256 => (
            fixtures::ECDSA_P256_D,
            fixtures::ECDSA_P256_QX,
            fixtures::ECDSA_P256_QY,
        ),
        CurveId::NIST_P384 => (
            fixtures::ECDSA_P384_D,
            fixtures::ECDSA_P384_QX,
            fixtures::ECDSA_P384_QY,
        ),
        other => panic!("no ECDSA fixture for curve {:#06x}", other.0),
    };
    let q = EccPoint::from_coordinates(&unhex(x), &unhex(y)).expect("fixture point");
    (unhex(d), q)
}

/// Deterministic randomness for tests that only need "some" bytes
pub fn seeded_rng(seed: u64) -> RngSource<ChaCha20Rng> {
    RngSource(ChaCha20Rng::seed_from_u64(seed))
}

/// Engine over `backend` fed by a seeded entropy source
pub fn engine<B: MathBackend>(
    backend: B,
    seed: u64,
) -> CryptoEngine<B, ContinuousEntropy<ChaCha20Rng>> {
    let source = ContinuousEntropy::new(ChaCha20Rng::seed_from_u64(seed));
    CryptoEngine::startup(backend, source, EngineConfig::default())
}
