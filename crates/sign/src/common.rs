//! Conversions shared by the ECC signature schemes

use core::cmp::Ordering;

use tpm2crypt_algorithms::ec::{arith, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::{EccParameter, EccPoint as WirePoint};

/// Upper bound on fresh ephemeral scalars drawn for one signature
pub(crate) const MAX_SIGN_ATTEMPTS: usize = 16;

/// Digest as an integer, keeping only the leftmost `bits(n)` bits
pub fn digest_to_int<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    digest: &[u8],
) -> Result<B::Int> {
    let e = b.from_be_bytes(digest);
    let digest_bits = digest.len() * 8;
    if digest_bits > curve.order_bits() {
        b.shift_right(&e, digest_bits - curve.order_bits())
    } else {
        Ok(e)
    }
}

/// True when `0 < x < n`
pub fn in_scalar_range<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    x: &B::Int,
) -> bool {
    !b.is_zero(x) && b.compare(x, &curve.n) == Ordering::Less
}

/// Private scalar from its wire form; must lie in `[1, n - 1]`
pub fn private_scalar<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &[u8],
) -> Result<B::Int> {
    let d = b.from_be_bytes(d);
    if !in_scalar_range(b, curve, &d) {
        return Err(Error::Key {
            context: "private scalar out of range",
        });
    }
    Ok(d)
}

/// Point from its wire form, rejected when not on the curve or infinite
pub fn validated_point<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    point: &WirePoint,
) -> Result<EccPoint<B::Int>> {
    let p = b.point_from_wire(point);
    if !b.point_is_on_curve(curve, &p)? || arith::is_infinity(b, &p) {
        return Err(Error::PointNotOnCurve);
    }
    Ok(p)
}

/// Scalar padded to the order size, as carried in a signature
pub fn scalar_to_param<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    x: &B::Int,
) -> Result<EccParameter> {
    let bytes = b.to_be_bytes_padded(x, curve.order_bytes())?;
    EccParameter::from_slice(&bytes).map_err(|_| Error::Length {
        context: "ECC scalar",
        expected: EccParameter::CAPACITY,
        actual: bytes.len(),
    })
}

/// x coordinate of an affine point, padded to the field size
pub fn x_coordinate_bytes<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<Vec<u8>> {
    b.to_be_bytes_padded(&p.x, curve.field_bytes())
}
