//! RSA primitives, padding and key generation
//!
//! Every public and private operation is a call to
//! [`MathBackend::mod_exp`]. Private keys are held as the two primes plus
//! the private exponent and are used through the Chinese Remainder Theorem.

use core::cmp::Ordering;

use tpm2crypt_api::{HashAlg, RsaScheme};
use tpm2crypt_common::SecretVec;
use tpm2crypt_params::traditional::rsa::{MAX_RSA_KEY_BITS, RSA_DEFAULT_PUBLIC_EXPONENT};

use crate::drbg::RandomSource;
use crate::error::{validate, Error, Result};
use crate::math::MathBackend;

pub mod cache;
pub mod keygen;
pub mod padding;

pub use cache::ExpDCache;
pub use keygen::generate_key;

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

/// Public half of an RSA key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: Vec<u8>,
    exponent: u32,
    bits: usize,
}

impl RsaPublicKey {
    /// Key from a big-endian modulus and exponent
    ///
    /// An exponent of zero selects 65537.
    pub fn new(modulus: &[u8], exponent: u32) -> Result<Self> {
        let modulus = strip_leading_zeros(modulus);
        let bits = match modulus.first() {
            Some(&top) => modulus.len() * 8 - top.leading_zeros() as usize,
            None => 0,
        };
        validate::parameter(bits >= 512, "modulus", "too small")?;
        validate::parameter(bits <= MAX_RSA_KEY_BITS, "modulus", "too large")?;
        validate::parameter(
            modulus.last().map_or(false, |b| b & 1 == 1),
            "modulus",
            "must be odd",
        )?;
        let exponent = if exponent == 0 {
            RSA_DEFAULT_PUBLIC_EXPONENT
        } else {
            exponent
        };
        validate::parameter(exponent & 1 == 1 && exponent > 1, "exponent", "must be odd and > 1")?;
        Ok(Self {
            modulus: modulus.to_vec(),
            exponent,
            bits,
        })
    }

    /// Minimal big-endian modulus
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Public exponent
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Modulus size in bytes; every ciphertext and signature has this length
    pub fn size(&self) -> usize {
        (self.bits + 7) / 8
    }
}

/// Private RSA key in CRT form
#[derive(Clone)]
pub struct RsaPrivateKey {
    public: RsaPublicKey,
    p: SecretVec,
    q: SecretVec,
    d: SecretVec,
}

impl RsaPrivateKey {
    /// Key from all of its parts, checking `p * q == n`
    pub fn from_parts<B: MathBackend + ?Sized>(
        b: &B,
        public: RsaPublicKey,
        p: &[u8],
        q: &[u8],
        d: &[u8],
    ) -> Result<Self> {
        let n = b.from_be_bytes(public.modulus());
        let product = b.mul(&b.from_be_bytes(p), &b.from_be_bytes(q))?;
        if b.compare(&product, &n) != Ordering::Equal {
            return Err(Error::Key {
                context: "p * q does not equal the modulus",
            });
        }
        Ok(Self {
            public,
            p: SecretVec::from_slice(strip_leading_zeros(p)),
            q: SecretVec::from_slice(strip_leading_zeros(q)),
            d: SecretVec::from_slice(strip_leading_zeros(d)),
        })
    }

    /// Rebuild the key from the public part and one prime
    ///
    /// `(Q, D)` comes from `cache` when present and still consistent with
    /// the modulus; otherwise it is derived (`Q = N / P`,
    /// `D = E^-1 mod (P-1)(Q-1)`) and stored in the cache.
    pub fn from_prime<B: MathBackend + ?Sized>(
        b: &B,
        cache: &mut ExpDCache,
        public: RsaPublicKey,
        p: &[u8],
    ) -> Result<Self> {
        let p = strip_leading_zeros(p);
        let e = public.exponent();
        if let Some((q, d)) = cache.find(p, public.modulus(), e) {
            if let Ok(key) = Self::from_parts(b, public.clone(), p, q.as_slice(), d.as_slice()) {
                return Ok(key);
            }
            log::debug!("discarding inconsistent exponent cache entry");
        }

        let n = b.from_be_bytes(public.modulus());
        let p_int = b.from_be_bytes(p);
        validate::parameter(!b.is_zero(&p_int), "p", "must be non-zero")?;
        let (q, rem) = b.div_rem(&n, &p_int)?;
        if !b.is_zero(&rem) || b.eq_word(&q, 1) || b.eq_word(&p_int, 1) {
            return Err(Error::Key {
                context: "prime does not divide the modulus",
            });
        }
        let d = private_exponent(b, &p_int, &q, e)?;

        let q_bytes = SecretVec::new(b.to_be_bytes(&q));
        let d_bytes = SecretVec::new(b.to_be_bytes(&d));
        cache.add(p, public.modulus(), e, q_bytes.as_slice(), d_bytes.as_slice());
        Ok(Self {
            public,
            p: SecretVec::from_slice(p),
            q: q_bytes,
            d: d_bytes,
        })
    }

    /// Public half
    pub fn public(&self) -> &RsaPublicKey {
        &self.public
    }

    /// First prime
    pub fn p(&self) -> &[u8] {
        self.p.as_slice()
    }

    /// Second prime
    pub fn q(&self) -> &[u8] {
        self.q.as_slice()
    }

    /// Private exponent
    pub fn d(&self) -> &[u8] {
        self.d.as_slice()
    }
}

impl core::fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// `D = E^-1 mod (P-1)(Q-1)`
pub(crate) fn private_exponent<B: MathBackend + ?Sized>(
    b: &B,
    p: &B::Int,
    q: &B::Int,
    e: u32,
) -> Result<B::Int> {
    let one = b.from_word(1);
    let phi = b.mul(&b.sub(p, &one)?, &b.sub(q, &one)?)?;
    b.mod_inverse(&b.from_word(u64::from(e)), &phi)?
        .ok_or(Error::Key {
            context: "exponent is not invertible",
        })
}

/// `input^E mod N`, output padded to the modulus size
pub fn public_op<B: MathBackend + ?Sized>(
    b: &B,
    key: &RsaPublicKey,
    input: &[u8],
) -> Result<Vec<u8>> {
    let n = b.from_be_bytes(key.modulus());
    let m = b.from_be_bytes(input);
    if b.compare(&m, &n) != Ordering::Less {
        return Err(Error::param("input", "not below the modulus"));
    }
    let c = b.mod_exp(&m, &b.from_word(u64::from(key.exponent())), &n)?;
    b.to_be_bytes_padded(&c, key.size())
}

/// `input^D mod N` by CRT, output padded to the modulus size
pub fn private_op<B: MathBackend + ?Sized>(
    b: &B,
    key: &RsaPrivateKey,
    input: &[u8],
) -> Result<Vec<u8>> {
    let n = b.from_be_bytes(key.public.modulus());
    let c = b.from_be_bytes(input);
    if b.compare(&c, &n) != Ordering::Less {
        return Err(Error::param("input", "not below the modulus"));
    }
    let p = b.from_be_bytes(key.p());
    let q = b.from_be_bytes(key.q());
    let d = b.from_be_bytes(key.d());
    let one = b.from_word(1);

    let dp = b.reduce(&d, &b.sub(&p, &one)?)?;
    let dq = b.reduce(&d, &b.sub(&q, &one)?)?;
    let q_inv = b.mod_inverse(&q, &p)?.ok_or(Error::Key {
        context: "q is not invertible modulo p",
    })?;

    let m1 = b.mod_exp(&c, &dp, &p)?;
    let m2 = b.mod_exp(&c, &dq, &q)?;
    let h = b.mod_mult(&q_inv, &b.mod_sub(&m1, &m2, &p)?, &p)?;
    let m = b.add(&m2, &b.mul(&h, &q)?)?;
    b.to_be_bytes_padded(&m, key.public.size())
}

/// Encrypt `message` under `scheme`
///
/// `hash` and `label` only matter for OAEP.
pub fn encrypt<B, R>(
    b: &B,
    key: &RsaPublicKey,
    scheme: RsaScheme,
    hash: HashAlg,
    label: &[u8],
    message: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let k = key.size();
    let em = match scheme {
        RsaScheme::OAEP => padding::oaep_encode(hash, label, message, k, rng)?,
        RsaScheme::RSAES => padding::pkcs1v15_encrypt_encode(message, k, rng)?,
        RsaScheme::NULL => {
            validate::max_length("RSA raw input", message.len(), k)?;
            let mut em = vec![0u8; k];
            em[k - message.len()..].copy_from_slice(message);
            em
        }
        _ => {
            return Err(Error::Scheme {
                context: "RSA encryption",
            })
        }
    };
    public_op(b, key, &em)
}

/// Decrypt `ciphertext` under `scheme`
pub fn decrypt<B: MathBackend + ?Sized>(
    b: &B,
    key: &RsaPrivateKey,
    scheme: RsaScheme,
    hash: HashAlg,
    label: &[u8],
    ciphertext: &[u8],
) -> Result<SecretVec> {
    let k = key.public.size();
    validate::length("RSA ciphertext", ciphertext.len(), k)?;
    if !matches!(scheme, RsaScheme::OAEP | RsaScheme::RSAES | RsaScheme::NULL) {
        return Err(Error::Scheme {
            context: "RSA decryption",
        });
    }
    let em = SecretVec::new(private_op(b, key, ciphertext)?);
    match scheme {
        RsaScheme::OAEP => padding::oaep_decode(hash, label, em.as_slice()),
        RsaScheme::RSAES => padding::pkcs1v15_encrypt_decode(em.as_slice()),
        _ => Ok(em),
    }
}

/// Sign a precomputed `digest`
pub fn sign<B, R>(
    b: &B,
    key: &RsaPrivateKey,
    scheme: RsaScheme,
    hash: HashAlg,
    digest: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let em = match scheme {
        RsaScheme::RSASSA => padding::pkcs1v15_sign_encode(hash, digest, key.public.size())?,
        RsaScheme::RSAPSS => padding::pss_encode(hash, digest, key.public.bits(), rng)?,
        _ => {
            return Err(Error::Scheme {
                context: "RSA signing",
            })
        }
    };
    private_op(b, key, &em)
}

/// Verify `signature` over a precomputed `digest`
pub fn verify<B: MathBackend + ?Sized>(
    b: &B,
    key: &RsaPublicKey,
    scheme: RsaScheme,
    hash: HashAlg,
    digest: &[u8],
    signature: &[u8],
) -> Result<()> {
    let algorithm = match scheme {
        RsaScheme::RSASSA => "RSASSA-PKCS1-v1_5",
        RsaScheme::RSAPSS => "RSASSA-PSS",
        _ => {
            return Err(Error::Scheme {
                context: "RSA verification",
            })
        }
    };
    let k = key.size();
    validate::signature(signature.len() == k, algorithm)?;
    let em = match public_op(b, key, signature) {
        Ok(em) => em,
        Err(e) if e.is_fatal() => return Err(e),
        Err(_) => return Err(Error::Signature { algorithm }),
    };
    match scheme {
        RsaScheme::RSASSA => {
            let expected = padding::pkcs1v15_sign_encode(hash, digest, k)
                .map_err(|_| Error::Signature { algorithm })?;
            validate::signature(tpm2crypt_internal::ct_eq(&expected, &em), algorithm)
        }
        _ => {
            let em_len = (key.bits() - 1 + 7) / 8;
            // the encoded message is one byte shorter when bits - 1 is a multiple of 8
            let (lead, em) = em.split_at(k - em_len);
            validate::signature(lead.iter().all(|&x| x == 0), algorithm)?;
            padding::pss_verify(hash, digest, em, key.bits())
        }
    }
}
