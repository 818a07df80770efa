//! Full unified model ECDH, C(2e, 2s) from SP 800-56A

use tpm2crypt_algorithms::ec::{EccCurve, EccPoint};
use tpm2crypt_algorithms::error::Result;
use tpm2crypt_algorithms::MathBackend;

use crate::common::cofactor_mul;

/// `(Z1, Z2) = ([h·dsA]QsB, [h·deA]QeB)`
pub fn full_unified<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    ds_a: &B::Int,
    de_a: &B::Int,
    qs_b: &EccPoint<B::Int>,
    qe_b: &EccPoint<B::Int>,
) -> Result<(EccPoint<B::Int>, EccPoint<B::Int>)> {
    let z1 = cofactor_mul(b, curve, ds_a, qs_b, "ECDH static")?;
    let z2 = cofactor_mul(b, curve, de_a, qe_b, "ECDH ephemeral")?;
    Ok((z1, z2))
}
