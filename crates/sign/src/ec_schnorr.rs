//! EC-Schnorr as defined for the TPM
//!
//! `R = [k]G`, `e = H(R.x || digest)` truncated to the order length,
//! `r = e mod n` and `s = k + r·d mod n`. Verification rebuilds
//! `R = [s]G - [r]Q` and recomputes `r`.

use tpm2crypt_algorithms::drbg::RandomSource;
use tpm2crypt_algorithms::ec::{arith, random_scalar, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{validate, Error, Result};
use tpm2crypt_algorithms::hash::digest_parts;
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::HashAlg;

use crate::common::{digest_to_int, in_scalar_range, x_coordinate_bytes, MAX_SIGN_ATTEMPTS};
use crate::schnorr::schnorr_s;

const ALGORITHM: &str = "EC-Schnorr";

/// `H(R.x || digest)` reduced to a scalar
fn challenge<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
    point: &EccPoint<B::Int>,
    digest: &[u8],
) -> Result<B::Int> {
    let x = x_coordinate_bytes(b, curve, point)?;
    let e = digest_parts(hash, &[x.as_slice(), digest]);
    b.reduce(&digest_to_int(b, curve, &e)?, &curve.n)
}

/// One signing attempt with ephemeral `k`
pub fn sign_with_k<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
    d: &B::Int,
    k: &B::Int,
    digest: &[u8],
) -> Result<(B::Int, B::Int)> {
    let point = b.point_mul(curve, k, &curve.g)?;
    if arith::is_infinity(b, &point) {
        return Err(Error::NoResult {
            operation: "EC-Schnorr commitment",
        });
    }
    let r = challenge(b, curve, hash, &point, digest)?;
    let s = schnorr_s(b, k, &r, d, &curve.n)?;
    Ok((r, s))
}

/// Sign `digest` with private scalar `d`
pub fn sign<B, R>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
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
        match sign_with_k(b, curve, hash, d, &k, digest) {
            Err(Error::NoResult { .. }) => continue,
            other => return other,
        }
    }
    Err(Error::NoResult {
        operation: "EC-Schnorr signing",
    })
}

/// Verify `(r, s)` over `digest` against public point `q`
pub fn verify<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
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
    let minus_r = b.mod_sub(&b.from_word(0), r, n)?;
    let point = b.point_mul2(curve, s, &curve.g, &minus_r, q)?;
    if arith::is_infinity(b, &point) {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let expected = challenge(b, curve, hash, &point, digest)?;
    validate::signature(b.compare(&expected, r).is_eq(), ALGORITHM)
}
