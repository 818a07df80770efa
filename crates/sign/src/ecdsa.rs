//! ECDSA (FIPS 186-4, 6.4)

use tpm2crypt_algorithms::drbg::RandomSource;
use tpm2crypt_algorithms::ec::{arith, random_scalar, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;

use crate::common::{digest_to_int, in_scalar_range, MAX_SIGN_ATTEMPTS};

const ALGORITHM: &str = "ECDSA";

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
            operation: "ECDSA commitment",
        });
    }
    let r = b.reduce(&point.x, n)?;
    if b.is_zero(&r) {
        return Err(Error::NoResult {
            operation: "ECDSA r",
        });
    }
    let e = digest_to_int(b, curve, digest)?;
    let k_inv = b.mod_inverse(k, n)?.ok_or(Error::NoResult {
        operation: "ECDSA k inverse",
    })?;
    let rd = b.mod_mult(&r, d, n)?;
    let s = b.mod_mult(&k_inv, &b.mod_add(&e, &rd, n)?, n)?;
    if b.is_zero(&s) {
        return Err(Error::NoResult {
            operation: "ECDSA s",
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
        operation: "ECDSA signing",
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
    let e = digest_to_int(b, curve, digest)?;
    let w = b.mod_inverse(s, n)?.ok_or(Error::Signature {
        algorithm: ALGORITHM,
    })?;
    let u1 = b.mod_mult(&b.reduce(&e, n)?, &w, n)?;
    let u2 = b.mod_mult(r, &w, n)?;
    let x = b.point_mul2(curve, &u1, &curve.g, &u2, q)?;
    if arith::is_infinity(b, &x) {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let v = b.reduce(&x.x, n)?;
    tpm2crypt_algorithms::validate::signature(b.compare(&v, r).is_eq(), ALGORITHM)
}
