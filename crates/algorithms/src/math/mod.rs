//! Math backend abstraction
//!
//! Everything above this module is written once against [`MathBackend`].
//! Two implementations exist: [`NativeBackend`] over this crate's
//! [`BigNum`](crate::bignum::BigNum), and [`ExternalBackend`] delegating to
//! the `num-bigint` library. Both must produce byte-identical encodings for
//! identical values.
//!
//! Integer operations return new values; the ECC operations are provided
//! methods built from them, so a backend only has to supply integer
//! arithmetic.

use core::cmp::Ordering;
use core::fmt;

use tpm2crypt_api::{CurveId, EccPoint as WirePoint};

use crate::ec::{self, EccCurve, EccPoint};
use crate::error::Result;

mod external;
mod native;

pub use external::ExternalBackend;
pub use native::NativeBackend;

/// Integer and point arithmetic surface shared by every backend
pub trait MathBackend {
    /// Backend integer handle
    type Int: Clone + fmt::Debug + PartialEq;

    /// Name for logs
    fn name(&self) -> &'static str;

    /// Parse big-endian bytes (leading zeros allowed)
    fn from_be_bytes(&self, bytes: &[u8]) -> Self::Int;

    /// Minimal big-endian encoding; zero encodes as no bytes
    fn to_be_bytes(&self, a: &Self::Int) -> Vec<u8>;

    /// Big-endian encoding left-padded to `size` bytes
    fn to_be_bytes_padded(&self, a: &Self::Int, size: usize) -> Result<Vec<u8>>;

    /// Single-word value
    fn from_word(&self, w: u64) -> Self::Int;

    /// True when `a` is zero
    fn is_zero(&self, a: &Self::Int) -> bool;

    /// Bits up to and including the most significant set bit
    fn bits(&self, a: &Self::Int) -> usize;

    /// Test bit `bit`
    fn bit_test(&self, a: &Self::Int, bit: usize) -> bool;

    /// Magnitude comparison
    fn compare(&self, a: &Self::Int, b: &Self::Int) -> Ordering;

    /// `a + b`
    fn add(&self, a: &Self::Int, b: &Self::Int) -> Result<Self::Int>;

    /// `a - b`; fatal when `b > a`
    fn sub(&self, a: &Self::Int, b: &Self::Int) -> Result<Self::Int>;

    /// `a * b`
    fn mul(&self, a: &Self::Int, b: &Self::Int) -> Result<Self::Int>;

    /// `(a / d, a mod d)`; fatal when `d` is zero
    fn div_rem(&self, a: &Self::Int, d: &Self::Int) -> Result<(Self::Int, Self::Int)>;

    /// `a mod w` for a single word
    fn mod_word(&self, a: &Self::Int, w: u64) -> Result<u64>;

    /// `a << bits`
    fn shift_left(&self, a: &Self::Int, bits: usize) -> Result<Self::Int>;

    /// `a >> bits`
    fn shift_right(&self, a: &Self::Int, bits: usize) -> Result<Self::Int>;

    /// `(a * b) mod m`
    fn mod_mult(&self, a: &Self::Int, b: &Self::Int, m: &Self::Int) -> Result<Self::Int>;

    /// `a^-1 mod m`, or `None` when no inverse exists
    fn mod_inverse(&self, a: &Self::Int, m: &Self::Int) -> Result<Option<Self::Int>>;

    /// Greatest common divisor
    fn gcd(&self, a: &Self::Int, b: &Self::Int) -> Result<Self::Int>;

    /// `base^exp mod m`; the single path every RSA operation goes through
    #[cfg(feature = "rsa")]
    fn mod_exp(&self, base: &Self::Int, exp: &Self::Int, m: &Self::Int) -> Result<Self::Int>;

    // ------------------------------------------------------------------
    // Provided integer helpers
    // ------------------------------------------------------------------

    /// `a mod m`
    fn reduce(&self, a: &Self::Int, m: &Self::Int) -> Result<Self::Int> {
        Ok(self.div_rem(a, m)?.1)
    }

    /// `(a + b) mod m`
    fn mod_add(&self, a: &Self::Int, b: &Self::Int, m: &Self::Int) -> Result<Self::Int> {
        let sum = self.add(a, b)?;
        self.reduce(&sum, m)
    }

    /// `(a - b) mod m`
    fn mod_sub(&self, a: &Self::Int, b: &Self::Int, m: &Self::Int) -> Result<Self::Int> {
        let a = self.reduce(a, m)?;
        let b = self.reduce(b, m)?;
        if self.compare(&a, &b) != Ordering::Less {
            self.sub(&a, &b)
        } else {
            let lifted = self.add(&a, m)?;
            self.sub(&lifted, &b)
        }
    }

    /// Keep the low `bits` bits of `a`
    fn mask_bits(&self, a: &Self::Int, bits: usize) -> Result<Self::Int> {
        let high = self.shift_right(a, bits)?;
        let high = self.shift_left(&high, bits)?;
        self.sub(a, &high)
    }

    /// True when `a == w`
    fn eq_word(&self, a: &Self::Int, w: u64) -> bool {
        self.compare(a, &self.from_word(w)) == Ordering::Equal
    }

    // ------------------------------------------------------------------
    // Provided ECC operations
    // ------------------------------------------------------------------

    /// Load a registered curve into this backend's representation
    fn curve_init(&self, id: CurveId) -> Result<EccCurve<Self::Int>> {
        ec::curve::init(self, id)
    }

    /// Affine point from wire coordinates
    fn point_from_wire(&self, point: &WirePoint) -> EccPoint<Self::Int> {
        EccPoint::new(
            self.from_be_bytes(point.x.as_slice()),
            self.from_be_bytes(point.y.as_slice()),
            self.from_word(1),
        )
    }

    /// Wire coordinates of a normalized point, padded to the field size
    fn point_to_wire(
        &self,
        curve: &EccCurve<Self::Int>,
        point: &EccPoint<Self::Int>,
    ) -> Result<WirePoint> {
        ec::arith::to_wire(self, curve, point)
    }

    /// `[k]P`, normalized; the result may be the point at infinity
    fn point_mul(
        &self,
        curve: &EccCurve<Self::Int>,
        k: &Self::Int,
        point: &EccPoint<Self::Int>,
    ) -> Result<EccPoint<Self::Int>> {
        let r = ec::arith::scalar_mul(self, curve, k, point)?;
        ec::arith::normalize(self, curve, &r)
    }

    /// `[u]P + [v]Q`, normalized
    fn point_mul2(
        &self,
        curve: &EccCurve<Self::Int>,
        u: &Self::Int,
        p: &EccPoint<Self::Int>,
        v: &Self::Int,
        q: &EccPoint<Self::Int>,
    ) -> Result<EccPoint<Self::Int>> {
        let up = ec::arith::scalar_mul(self, curve, u, p)?;
        let vq = ec::arith::scalar_mul(self, curve, v, q)?;
        let sum = ec::arith::add(self, curve, &up, &vq)?;
        ec::arith::normalize(self, curve, &sum)
    }

    /// `P + Q`, normalized
    fn point_add(
        &self,
        curve: &EccCurve<Self::Int>,
        p: &EccPoint<Self::Int>,
        q: &EccPoint<Self::Int>,
    ) -> Result<EccPoint<Self::Int>> {
        let sum = ec::arith::add(self, curve, p, q)?;
        ec::arith::normalize(self, curve, &sum)
    }

    /// `-P`
    fn point_negate(
        &self,
        curve: &EccCurve<Self::Int>,
        p: &EccPoint<Self::Int>,
    ) -> Result<EccPoint<Self::Int>> {
        ec::arith::negate(self, curve, p)
    }

    /// True when `P` is the point at infinity or satisfies the curve
    /// equation with both coordinates reduced
    fn point_is_on_curve(&self, curve: &EccCurve<Self::Int>, p: &EccPoint<Self::Int>) -> Result<bool> {
        ec::arith::is_on_curve(self, curve, p)
    }
}

#[cfg(test)]
mod tests;
