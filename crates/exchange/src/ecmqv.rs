//! ECMQV, C(2e, 2s) from SP 800-56A
//!
//! Our implicit signature is `tA = deA + avf(QeA)·dsA mod n`; the shared
//! point is `Z = [h·tA](QeB + [avf(QeB)]QsB)`.

use tpm2crypt_algorithms::ec::{arith, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;

use crate::common::{avf, cofactor_mul, public_point};

/// Compute the ECMQV shared point
pub fn ecmqv<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    ds_a: &B::Int,
    de_a: &B::Int,
    qs_b: &EccPoint<B::Int>,
    qe_b: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    let n = &curve.n;
    let qe_a = public_point(b, curve, de_a)?;
    let implicit = b.mod_mult(&avf(b, curve, &qe_a)?, ds_a, n)?;
    let t_a = b.mod_add(de_a, &implicit, n)?;

    let shifted = b.point_mul(curve, &avf(b, curve, qe_b)?, qs_b)?;
    let base = b.point_add(curve, qe_b, &shifted)?;
    if arith::is_infinity(b, &base) {
        return Err(Error::NoResult {
            operation: "ECMQV peer point",
        });
    }
    cofactor_mul(b, curve, &t_a, &base, "ECMQV")
}
