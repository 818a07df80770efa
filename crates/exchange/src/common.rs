//! Input conversion and associate values shared by the exchange schemes

use core::cmp::Ordering;

use tpm2crypt_algorithms::ec::{arith, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::EccPoint as WirePoint;

/// Private scalar from its wire form; must lie in `[1, n - 1]`
pub fn private_scalar<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &[u8],
) -> Result<B::Int> {
    let d = b.from_be_bytes(d);
    if b.is_zero(&d) || b.compare(&d, &curve.n) != Ordering::Less {
        return Err(Error::Key {
            context: "private scalar out of range",
        });
    }
    Ok(d)
}

/// Peer point from its wire form, rejected when not on the curve or infinite
pub fn peer_point<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    q: &WirePoint,
) -> Result<EccPoint<B::Int>> {
    let p = b.point_from_wire(q);
    if arith::is_infinity(b, &p) || !b.point_is_on_curve(curve, &p)? {
        return Err(Error::PointNotOnCurve);
    }
    Ok(p)
}

/// `2^bits + (x mod 2^bits)`
fn associate<B: MathBackend + ?Sized>(b: &B, x: &B::Int, bits: usize) -> Result<B::Int> {
    let low = b.mask_bits(x, bits)?;
    let high = b.shift_left(&b.from_word(1), bits)?;
    b.add(&low, &high)
}

/// ECMQV associate value of `P`, with `f = ceil(bits(n) / 2)`
pub fn avf<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<B::Int> {
    associate(b, &p.x, (curve.order_bits() + 1) / 2)
}

/// SM2 associate value of `P`, with `w = ceil(bits(n) / 2) - 1`
pub fn avf_sm2<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<B::Int> {
    associate(b, &p.x, (curve.order_bits() + 1) / 2 - 1)
}

/// `[h·k]P`; the point at infinity is `NoResult`
pub fn cofactor_mul<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    k: &B::Int,
    p: &EccPoint<B::Int>,
    operation: &'static str,
) -> Result<EccPoint<B::Int>> {
    let hk = b.mul(&curve.h, k)?;
    let z = b.point_mul(curve, &hk, p)?;
    if arith::is_infinity(b, &z) {
        return Err(Error::NoResult { operation });
    }
    Ok(z)
}

/// `[d]G` for one of our own ephemeral scalars
pub(crate) fn public_point<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &B::Int,
) -> Result<EccPoint<B::Int>> {
    let q = b.point_mul(curve, d, &curve.g)?;
    if arith::is_infinity(b, &q) {
        return Err(Error::NoResult {
            operation: "ephemeral public key",
        });
    }
    Ok(q)
}
