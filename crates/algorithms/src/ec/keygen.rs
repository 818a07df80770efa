//! Scalar and key pair generation (FIPS 186-4, B.4.1)

use super::{EccCurve, EccPoint};
use crate::drbg::RandomSource;
use crate::error::Result;
use crate::math::MathBackend;
use tpm2crypt_common::SecretVec;

/// Random scalar in `[1, n - 1]`
///
/// Draws `c` with 64 more bits than the order and returns
/// `(c mod (n - 1)) + 1`, so the bias is at most 2^-64.
pub fn random_scalar<B, R>(b: &B, curve: &EccCurve<B::Int>, rng: &mut R) -> Result<B::Int>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let bits = curve.order_bits() + 64;
    let mut bytes = SecretVec::zeroed((bits + 7) / 8);
    rng.fill(bytes.as_mut_slice())?;
    let c = b.mask_bits(&b.from_be_bytes(bytes.as_slice()), bits)?;
    let n_minus_1 = b.sub(&curve.n, &b.from_word(1))?;
    let reduced = b.reduce(&c, &n_minus_1)?;
    b.add(&reduced, &b.from_word(1))
}

/// Fresh key pair `(d, [d]G)`
pub fn generate_key_pair<B, R>(
    b: &B,
    curve: &EccCurve<B::Int>,
    rng: &mut R,
) -> Result<(B::Int, EccPoint<B::Int>)>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let d = random_scalar(b, curve, rng)?;
    let q = b.point_mul(curve, &d, &curve.g)?;
    Ok((d, q))
}
