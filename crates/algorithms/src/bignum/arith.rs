//! Addition, subtraction, multiplication and shifts

use core::cmp::Ordering;

use tpm2crypt_api::FailureCode;

use super::{compare, BigNum, Word, MAX_PRODUCT_WORDS, WORD_BITS};
use crate::error::{Error, Result};

/// `result = a + b`
#[track_caller]
pub fn add(result: &mut BigNum, a: &BigNum, b: &BigNum) -> Result<()> {
    let len = a.size().max(b.size());
    if len + 1 > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    let mut carry = 0u64;
    for (i, slot) in scratch.iter_mut().enumerate().take(len) {
        let (t, c1) = a.word(i).overflowing_add(b.word(i));
        let (t, c2) = t.overflowing_add(carry);
        *slot = t;
        carry = (c1 | c2) as u64;
    }
    scratch[len] = carry;
    result.set_words(&scratch[..len + 1])
}

/// `result = a + w`
#[track_caller]
pub fn add_word(result: &mut BigNum, a: &BigNum, w: Word) -> Result<()> {
    let b = BigNum::from_word(w, 1);
    add(result, a, &b)
}

/// `result = a - b`; `b > a` is a fatal contract violation
#[track_caller]
pub fn sub(result: &mut BigNum, a: &BigNum, b: &BigNum) -> Result<()> {
    if compare(a, b) == Ordering::Less {
        return Err(Error::fatal(FailureCode::Parameter));
    }
    let len = a.size();
    if len > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    let mut borrow = 0u64;
    for (i, slot) in scratch.iter_mut().enumerate().take(len) {
        let (t, b1) = a.word(i).overflowing_sub(b.word(i));
        let (t, b2) = t.overflowing_sub(borrow);
        *slot = t;
        borrow = (b1 | b2) as u64;
    }
    result.set_words(&scratch[..len])
}

/// `result = a - w`; `w > a` is fatal
#[track_caller]
pub fn sub_word(result: &mut BigNum, a: &BigNum, w: Word) -> Result<()> {
    let b = BigNum::from_word(w, 1);
    sub(result, a, &b)
}

/// Schoolbook product of two limb slices into `out`, which must hold
/// `a.len() + b.len()` limbs
pub(crate) fn mul_words(a: &[Word], b: &[Word], out: &mut [Word]) {
    for slot in out.iter_mut() {
        *slot = 0;
    }
    for (i, &x) in a.iter().enumerate() {
        let mut carry: u128 = 0;
        for (j, &y) in b.iter().enumerate() {
            let t = (x as u128) * (y as u128) + out[i + j] as u128 + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + b.len()] = carry as u64;
    }
}

/// `result = a * b`
#[track_caller]
pub fn mul(result: &mut BigNum, a: &BigNum, b: &BigNum) -> Result<()> {
    let len = a.size() + b.size();
    if len > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    mul_words(a.words(), b.words(), &mut scratch[..len]);
    result.set_words(&scratch[..len])
}

/// `result = a << bits`
#[track_caller]
pub fn shift_left(result: &mut BigNum, a: &BigNum, bits: usize) -> Result<()> {
    if a.is_zero() {
        result.set_zero();
        return Ok(());
    }
    let word_shift = bits / WORD_BITS;
    let bit_shift = bits % WORD_BITS;
    let len = a.size() + word_shift + 1;
    if len > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    for i in 0..a.size() {
        let w = a.word(i);
        if bit_shift == 0 {
            scratch[i + word_shift] = w;
        } else {
            scratch[i + word_shift] |= w << bit_shift;
            scratch[i + word_shift + 1] = w >> (WORD_BITS - bit_shift);
        }
    }
    result.set_words(&scratch[..len])
}

/// `result = a >> bits`
#[track_caller]
pub fn shift_right(result: &mut BigNum, a: &BigNum, bits: usize) -> Result<()> {
    let word_shift = bits / WORD_BITS;
    let bit_shift = bits % WORD_BITS;
    if word_shift >= a.size() {
        result.set_zero();
        return Ok(());
    }
    let len = a.size() - word_shift;
    if len > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    for (i, slot) in scratch.iter_mut().enumerate().take(len) {
        let lo = a.word(i + word_shift);
        *slot = if bit_shift == 0 {
            lo
        } else {
            (lo >> bit_shift) | (a.word(i + word_shift + 1) << (WORD_BITS - bit_shift))
        };
    }
    result.set_words(&scratch[..len])
}
