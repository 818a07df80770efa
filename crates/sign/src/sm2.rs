//! SM2 digital signatures (GB/T 32918.2)
//!
//! The digest passed in is `e = H(Z_A || M)`; computing `Z_A` from the
//! signer's identity is left to the caller.

use core::cmp::Ordering;

use tpm2crypt_algorithms::drbg::RandomSource;
use tpm2crypt_algorithms::ec::{arith, random_scalar, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{validate, Error, Result};
use tpm2crypt_algorithms::MathBackend;

use crate::common::{in_scalar_range, MAX_SIGN_ATTEMPTS};

const ALGORITHM: &str = "SM2";

/// One signing attempt with ephemeral `k`
pub fn sign_with_k<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &B::Int,
    k: &B::Int,
    digest: &[u8],
) -> Result<(B::Int, B::Int)> {
    let n = &curve.n;
    let point = b.point_mul(curve, k, &curve.g)?;
    if arith::is_infinity(b, &point) {
        return Err(Error::NoResult {
            operation: "SM2 commitment",
        });
    }
    let e = b.reduce(&b.from_be_bytes(digest), n)?;
    let r = b.mod_add(&e, &point.x, n)?;
    // r == 0 or r + k == n
    if b.is_zero(&r) || b.is_zero(&b.mod_add(&r, k, n)?) {
        return Err(Error::NoResult {
            operation: "SM2 r",
        });
    }
    let one_plus_d = b.mod_add(&b.from_word(1), d, n)?;
    let inv = b.mod_inverse(&one_plus_d, n)?.ok_or(Error::Key {
        context: "SM2 private key is n - 1",
    })?;
    let rd = b.mod_mult(&r, d, n)?;
    let s = b.mod_mult(&inv, &b.mod_sub(k, &rd, n)?, n)?;
    if b.is_zero(&s) {
        return Err(Error::NoResult {
            operation: "SM2 s",
        });
    }
    Ok((r, s))
}

/// Sign `digest` with private scalar `d`
pub fn sign<B, R>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &B::Int,
    digest: &[u8],
    rng: &mut R,
) -> Result<(B::Int, B::Int)>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    for _ in 0..MAX_SIGN_ATTEMPTS {
        let k = random_scalar(b, curve, rng)?;
        match sign_with_k(b, curve, d, &k, digest) {
            Err(Error::NoResult { .. }) => continue,
            other => return other,
        }
    }
    Err(Error::NoResult {
        operation: "SM2 signing",
    })
}

/// Verify `(r, s)` over `digest` against public point `q`
pub fn verify<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    q: &EccPoint<B::Int>,
    digest: &[u8],
    r: &B::Int,
    s: &B::Int,
) -> Result<()> {
    if !in_scalar_range(b, curve, r) || !in_scalar_range(b, curve, s) {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let n = &curve.n;
    let t = b.mod_add(r, s, n)?;
    if b.is_zero(&t) {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let point = b.point_mul2(curve, s, &curve.g, &t, q)?;
    if arith::is_infinity(b, &point) {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let e = b.reduce(&b.from_be_bytes(digest), n)?;
    let expected = b.mod_add(&e, &point.x, n)?;
    validate::signature(b.compare(&expected, r) == Ordering::Equal, ALGORITHM)
}
