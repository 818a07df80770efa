//! Jacobian point arithmetic over any backend
//!
//! Formulas are the general-`a` ones so every registered curve, including
//! the `a = 0` BN curve, goes through the same code.

use core::cmp::Ordering;

use tpm2crypt_api::{EccPoint as WirePoint, FailureCode};

use super::{EccCurve, EccPoint};
use crate::error::{Error, Result};
use crate::math::MathBackend;

/// The point at infinity
pub fn infinity<B: MathBackend + ?Sized>(b: &B) -> EccPoint<B::Int> {
    EccPoint::new(b.from_word(0), b.from_word(0), b.from_word(0))
}

/// True for the point at infinity
pub fn is_infinity<B: MathBackend + ?Sized>(b: &B, p: &EccPoint<B::Int>) -> bool {
    b.is_zero(&p.z)
}

/// `2P`
pub fn double<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    let m = &c.p;
    if is_infinity(b, p) || b.is_zero(&b.reduce(&p.y, m)?) {
        return Ok(infinity(b));
    }
    let y2 = b.mod_mult(&p.y, &p.y, m)?;
    let xy2 = b.mod_mult(&p.x, &y2, m)?;
    let s = b.mod_mult(&b.from_word(4), &xy2, m)?;

    let x2 = b.mod_mult(&p.x, &p.x, m)?;
    let z2 = b.mod_mult(&p.z, &p.z, m)?;
    let z4 = b.mod_mult(&z2, &z2, m)?;
    let slope = b.mod_add(
        &b.mod_mult(&b.from_word(3), &x2, m)?,
        &b.mod_mult(&c.a, &z4, m)?,
        m,
    )?;

    let x3 = b.mod_sub(&b.mod_mult(&slope, &slope, m)?, &b.mod_add(&s, &s, m)?, m)?;
    let y4 = b.mod_mult(&y2, &y2, m)?;
    let y3 = b.mod_sub(
        &b.mod_mult(&slope, &b.mod_sub(&s, &x3, m)?, m)?,
        &b.mod_mult(&b.from_word(8), &y4, m)?,
        m,
    )?;
    let z3 = b.mod_mult(&b.mod_add(&p.y, &p.y, m)?, &p.z, m)?;
    Ok(EccPoint::new(x3, y3, z3))
}

/// `P + Q`
pub fn add<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
    q: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    if is_infinity(b, p) {
        return Ok(q.clone());
    }
    if is_infinity(b, q) {
        return Ok(p.clone());
    }
    let m = &c.p;
    let z1z1 = b.mod_mult(&p.z, &p.z, m)?;
    let z2z2 = b.mod_mult(&q.z, &q.z, m)?;
    let u1 = b.mod_mult(&p.x, &z2z2, m)?;
    let u2 = b.mod_mult(&q.x, &z1z1, m)?;
    let s1 = b.mod_mult(&p.y, &b.mod_mult(&q.z, &z2z2, m)?, m)?;
    let s2 = b.mod_mult(&q.y, &b.mod_mult(&p.z, &z1z1, m)?, m)?;

    if b.compare(&u1, &u2) == Ordering::Equal {
        if b.compare(&s1, &s2) == Ordering::Equal {
            return double(b, c, p);
        }
        return Ok(infinity(b));
    }

    let h = b.mod_sub(&u2, &u1, m)?;
    let r = b.mod_sub(&s2, &s1, m)?;
    let h2 = b.mod_mult(&h, &h, m)?;
    let h3 = b.mod_mult(&h, &h2, m)?;
    let u1h2 = b.mod_mult(&u1, &h2, m)?;

    let x3 = b.mod_sub(
        &b.mod_sub(&b.mod_mult(&r, &r, m)?, &h3, m)?,
        &b.mod_add(&u1h2, &u1h2, m)?,
        m,
    )?;
    let y3 = b.mod_sub(
        &b.mod_mult(&r, &b.mod_sub(&u1h2, &x3, m)?, m)?,
        &b.mod_mult(&s1, &h3, m)?,
        m,
    )?;
    let z3 = b.mod_mult(&h, &b.mod_mult(&p.z, &q.z, m)?, m)?;
    Ok(EccPoint::new(x3, y3, z3))
}

/// `[k]P` by Montgomery ladder
///
/// The ladder always runs for at least the bit length of the group order,
/// performing one addition and one doubling per bit.
pub fn scalar_mul<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    k: &B::Int,
    p: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    let bits = b.bits(k).max(c.order_bits());
    let mut r0 = infinity(b);
    let mut r1 = p.clone();
    for i in (0..bits).rev() {
        if b.bit_test(k, i) {
            r0 = add(b, c, &r0, &r1)?;
            r1 = double(b, c, &r1)?;
        } else {
            r1 = add(b, c, &r0, &r1)?;
            r0 = double(b, c, &r0)?;
        }
    }
    Ok(r0)
}

/// Convert to affine (`z == 1`); infinity stays infinity
pub fn normalize<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    if is_infinity(b, p) {
        return Ok(infinity(b));
    }
    let m = &c.p;
    if b.eq_word(&p.z, 1) {
        return Ok(EccPoint::new(b.reduce(&p.x, m)?, b.reduce(&p.y, m)?, b.from_word(1)));
    }
    // z is non-zero and reduced, and p is prime, so the inverse exists
    let zinv = b
        .mod_inverse(&p.z, m)?
        .ok_or_else(|| Error::fatal(FailureCode::MathLibrary))?;
    let zinv2 = b.mod_mult(&zinv, &zinv, m)?;
    let zinv3 = b.mod_mult(&zinv2, &zinv, m)?;
    Ok(EccPoint::new(
        b.mod_mult(&p.x, &zinv2, m)?,
        b.mod_mult(&p.y, &zinv3, m)?,
        b.from_word(1),
    ))
}

/// `-P`
pub fn negate<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<EccPoint<B::Int>> {
    if is_infinity(b, p) {
        return Ok(infinity(b));
    }
    let y = b.mod_sub(&b.from_word(0), &p.y, &c.p)?;
    Ok(EccPoint::new(p.x.clone(), y, p.z.clone()))
}

/// Curve-equation check with coordinate range check
pub fn is_on_curve<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<bool> {
    if is_infinity(b, p) {
        return Ok(true);
    }
    let m = &c.p;
    let q = if b.eq_word(&p.z, 1) {
        p.clone()
    } else {
        normalize(b, c, p)?
    };
    if b.compare(&q.x, m) != Ordering::Less || b.compare(&q.y, m) != Ordering::Less {
        return Ok(false);
    }
    let lhs = b.mod_mult(&q.y, &q.y, m)?;
    let x3 = b.mod_mult(&b.mod_mult(&q.x, &q.x, m)?, &q.x, m)?;
    let ax = b.mod_mult(&c.a, &q.x, m)?;
    let rhs = b.mod_add(&b.mod_add(&x3, &ax, m)?, &c.b, m)?;
    Ok(b.compare(&lhs, &rhs) == Ordering::Equal)
}

/// Wire form of a point, coordinates padded to the field size
///
/// The point at infinity has no wire form and yields `NoResult`.
pub fn to_wire<B: MathBackend + ?Sized>(
    b: &B,
    c: &EccCurve<B::Int>,
    p: &EccPoint<B::Int>,
) -> Result<WirePoint> {
    if is_infinity(b, p) {
        return Err(Error::NoResult {
            operation: "point encoding",
        });
    }
    let q = normalize(b, c, p)?;
    let size = c.field_bytes();
    let x = b.to_be_bytes_padded(&q.x, size)?;
    let y = b.to_be_bytes_padded(&q.y, size)?;
    WirePoint::from_coordinates(&x, &y).map_err(|_| Error::Length {
        context: "ECC point",
        expected: tpm2crypt_api::EccParameter::CAPACITY,
        actual: size,
    })
}
