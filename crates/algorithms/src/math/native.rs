//! Backend over this crate's fixed-capacity integers

use core::cmp::Ordering;

use super::MathBackend;
use crate::bignum::{self, words_for_bits, BigNum};
use crate::error::Result;

/// Native software arithmetic
///
/// Each operation allocates its result at the capacity the operation
/// requires and then runs the in-place arithmetic into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl NativeBackend {
    /// Create the backend
    pub fn new() -> Self {
        NativeBackend
    }
}

impl MathBackend for NativeBackend {
    type Int = BigNum;

    fn name(&self) -> &'static str {
        "native"
    }

    fn from_be_bytes(&self, bytes: &[u8]) -> BigNum {
        BigNum::from_be_bytes(bytes)
    }

    fn to_be_bytes(&self, a: &BigNum) -> Vec<u8> {
        a.to_be_bytes()
    }

    fn to_be_bytes_padded(&self, a: &BigNum, size: usize) -> Result<Vec<u8>> {
        a.to_be_bytes_padded(size)
    }

    fn from_word(&self, w: u64) -> BigNum {
        BigNum::from_word(w, 1)
    }

    fn is_zero(&self, a: &BigNum) -> bool {
        a.is_zero()
    }

    fn bits(&self, a: &BigNum) -> usize {
        a.bits_used()
    }

    fn bit_test(&self, a: &BigNum, bit: usize) -> bool {
        a.bit_test(bit)
    }

    fn compare(&self, a: &BigNum, b: &BigNum) -> Ordering {
        bignum::compare(a, b)
    }

    fn add(&self, a: &BigNum, b: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size().max(b.size()) + 1);
        bignum::add(&mut r, a, b)?;
        Ok(r)
    }

    fn sub(&self, a: &BigNum, b: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size());
        bignum::sub(&mut r, a, b)?;
        Ok(r)
    }

    fn mul(&self, a: &BigNum, b: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size() + b.size());
        bignum::mul(&mut r, a, b)?;
        Ok(r)
    }

    fn div_rem(&self, a: &BigNum, d: &BigNum) -> Result<(BigNum, BigNum)> {
        let mut q = BigNum::with_capacity(a.size());
        let mut r = BigNum::with_capacity(d.size());
        bignum::div_rem(Some(&mut q), Some(&mut r), a, d)?;
        Ok((q, r))
    }

    fn mod_word(&self, a: &BigNum, w: u64) -> Result<u64> {
        bignum::mod_word(a, w)
    }

    fn shift_left(&self, a: &BigNum, bits: usize) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size() + words_for_bits(bits) + 1);
        bignum::shift_left(&mut r, a, bits)?;
        Ok(r)
    }

    fn shift_right(&self, a: &BigNum, bits: usize) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size());
        bignum::shift_right(&mut r, a, bits)?;
        Ok(r)
    }

    fn mod_mult(&self, a: &BigNum, b: &BigNum, m: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(m.size());
        bignum::mod_mult(&mut r, a, b, m)?;
        Ok(r)
    }

    fn mod_inverse(&self, a: &BigNum, m: &BigNum) -> Result<Option<BigNum>> {
        let mut r = BigNum::with_capacity(m.size());
        if bignum::mod_inverse(&mut r, a, m)? {
            Ok(Some(r))
        } else {
            Ok(None)
        }
    }

    fn gcd(&self, a: &BigNum, b: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(a.size().max(b.size()));
        bignum::gcd(&mut r, a, b)?;
        Ok(r)
    }

    #[cfg(feature = "rsa")]
    fn mod_exp(&self, base: &BigNum, exp: &BigNum, m: &BigNum) -> Result<BigNum> {
        let mut r = BigNum::with_capacity(m.size());
        bignum::mod_exp(&mut r, base, exp, m)?;
        Ok(r)
    }
}
