//! SM2 key exchange (GB/T 32918.3), up to the shared point
//!
//! `tA = (dsA + deA·av(xeA)) mod n` and
//! `Z = (h·tA mod n)(QsB + [av(xeB)]QeB)`. The ephemeral public key `QeA`
//! is recomputed from `deA`. Deriving the session key from `Z` and the
//! identities is left to the caller.

use tpm2crypt_algorithms::ec::{arith, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;

use crate::common::{avf_sm2, public_point};

/// Compute the SM2 shared point
pub fn key_exchange<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    ds_a: &B::Int,
    de_a: &B::Int,
    qs_b: &EccPoint<B::Int>,
    qe_b: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    let n = &curve.n;
    let qe_a = public_point(b, curve, de_a)?;
    let t = b.mod_add(ds_a, &b.mod_mult(de_a, &avf_sm2(b, curve, &qe_a)?, n)?, n)?;
    let ht = b.mod_mult(&curve.h, &t, n)?;

    let shifted = b.point_mul(curve, &avf_sm2(b, curve, qe_b)?, qe_b)?;
    let base = b.point_add(curve, qs_b, &shifted)?;
    let z = b.point_mul(curve, &ht, &base)?;
    if arith::is_infinity(b, &z) {
        return Err(Error::NoResult {
            operation: "SM2 key exchange",
        });
    }
    Ok(z)
}
