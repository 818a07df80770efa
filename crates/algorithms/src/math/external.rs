//! Backend delegating to the `num-bigint` library
//!
//! The library panics where the native code reports a fatal condition
//! (division by zero, unsigned underflow), so every such case is checked
//! before the call and turned into the same fatal outcome.

use core::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use tpm2crypt_api::FailureCode;

use super::MathBackend;
use crate::error::{Error, Result};

/// External math library backend
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalBackend;

impl ExternalBackend {
    /// Create the backend
    pub fn new() -> Self {
        ExternalBackend
    }
}

impl MathBackend for ExternalBackend {
    type Int = BigUint;

    fn name(&self) -> &'static str {
        "num-bigint"
    }

    fn from_be_bytes(&self, bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes)
    }

    fn to_be_bytes(&self, a: &BigUint) -> Vec<u8> {
        // the library encodes zero as a single 0x00 byte
        if a.is_zero() {
            Vec::new()
        } else {
            a.to_bytes_be()
        }
    }

    fn to_be_bytes_padded(&self, a: &BigUint, size: usize) -> Result<Vec<u8>> {
        let bytes = self.to_be_bytes(a);
        if bytes.len() > size {
            return Err(Error::Length {
                context: "BigUint encoding",
                expected: bytes.len(),
                actual: size,
            });
        }
        let mut out = vec![0u8; size];
        out[size - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }

    fn from_word(&self, w: u64) -> BigUint {
        BigUint::from(w)
    }

    fn is_zero(&self, a: &BigUint) -> bool {
        a.is_zero()
    }

    fn bits(&self, a: &BigUint) -> usize {
        a.bits() as usize
    }

    fn bit_test(&self, a: &BigUint, bit: usize) -> bool {
        a.bit(bit as u64)
    }

    fn compare(&self, a: &BigUint, b: &BigUint) -> Ordering {
        a.cmp(b)
    }

    fn add(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        Ok(a + b)
    }

    fn sub(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        if a < b {
            return Err(Error::fatal(FailureCode::Parameter));
        }
        Ok(a - b)
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        Ok(a * b)
    }

    fn div_rem(&self, a: &BigUint, d: &BigUint) -> Result<(BigUint, BigUint)> {
        if d.is_zero() {
            return Err(Error::fatal(FailureCode::DivideByZero));
        }
        Ok(a.div_rem(d))
    }

    fn mod_word(&self, a: &BigUint, w: u64) -> Result<u64> {
        if w == 0 {
            return Err(Error::fatal(FailureCode::DivideByZero));
        }
        (a % BigUint::from(w))
            .to_u64()
            .ok_or_else(|| Error::fatal(FailureCode::MathLibrary))
    }

    fn shift_left(&self, a: &BigUint, bits: usize) -> Result<BigUint> {
        Ok(a << bits)
    }

    fn shift_right(&self, a: &BigUint, bits: usize) -> Result<BigUint> {
        Ok(a >> bits)
    }

    fn mod_mult(&self, a: &BigUint, b: &BigUint, m: &BigUint) -> Result<BigUint> {
        if m.is_zero() {
            return Err(Error::fatal(FailureCode::DivideByZero));
        }
        Ok((a * b) % m)
    }

    fn mod_inverse(&self, a: &BigUint, m: &BigUint) -> Result<Option<BigUint>> {
        if m.is_zero() {
            return Err(Error::fatal(FailureCode::DivideByZero));
        }
        let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
        let mut r0 = modulus.clone();
        let mut r1 = BigInt::from_biguint(Sign::Plus, a % m);
        let mut t0 = BigInt::zero();
        let mut t1 = BigInt::one();
        while !r1.is_zero() {
            let (q, r2) = r0.div_rem(&r1);
            let t2 = &t0 - &q * &t1;
            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }
        if !r0.is_one() {
            return Ok(None);
        }
        let inv = t0.mod_floor(&modulus);
        inv.to_biguint()
            .map(Some)
            .ok_or_else(|| Error::fatal(FailureCode::MathLibrary))
    }

    fn gcd(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        Ok(Integer::gcd(a, b))
    }

    #[cfg(feature = "rsa")]
    fn mod_exp(&self, base: &BigUint, exp: &BigUint, m: &BigUint) -> Result<BigUint> {
        if m.is_zero() {
            return Err(Error::fatal(FailureCode::DivideByZero));
        }
        Ok(base.modpow(exp, m))
    }
}
