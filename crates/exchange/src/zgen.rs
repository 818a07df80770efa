//! One-pass ECDH, the arithmetic of `TPM2_ECDH_ZGen`

use tpm2crypt_algorithms::ec::{EccCurve, EccPoint};
use tpm2crypt_algorithms::error::Result;
use tpm2crypt_algorithms::MathBackend;

use crate::common::cofactor_mul;

/// `Z = [h·d]Q`
///
/// `q` must already be validated. A result at infinity is `NoResult`.
pub fn zgen<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &B::Int,
    q: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    cofactor_mul(b, curve, d, q, "ECDH ZGen")
}
