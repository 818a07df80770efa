//! Modular multiplication, exponentiation and inversion

use core::cmp::Ordering;

use tpm2crypt_api::FailureCode;
use tpm2crypt_internal::constant_time::ct_select_u64;

use super::arith::mul_words;
use super::div::rem_words;
use super::{add, compare, div_rem, mul, sub, BigNum, Word, MAX_PRODUCT_WORDS};
use crate::error::{Error, Result};

/// Window width for exponentiation
const WINDOW_BITS: usize = 4;
const TABLE_SIZE: usize = 1 << WINDOW_BITS;

/// `result = (a * b) mod m`
#[track_caller]
pub fn mod_mult(result: &mut BigNum, a: &BigNum, b: &BigNum, m: &BigNum) -> Result<()> {
    let len = a.size() + b.size();
    if len > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    let mut scratch = [0 as Word; MAX_PRODUCT_WORDS];
    mul_words(a.words(), b.words(), &mut scratch[..len]);
    rem_words(result, &scratch[..len], m)
}

/// Copy `table[index]` into `out` touching every entry
fn select_entry(out: &mut BigNum, table: &[BigNum], index: usize) {
    let words = out.capacity();
    let dst = out.words_mut();
    for w in dst.iter_mut() {
        *w = 0;
    }
    for (i, entry) in table.iter().enumerate() {
        let hit = i == index;
        for (j, w) in dst.iter_mut().enumerate().take(words) {
            *w = ct_select_u64(*w, entry.word(j), hit);
        }
    }
    out.normalize_from(words);
}

/// `result = base^exp mod m`
///
/// Fixed 4-bit windows: every window performs four squarings and one
/// multiplication by a table entry selected without secret-dependent
/// indexing, so the operation sequence depends only on the exponent's
/// length.
#[track_caller]
pub fn mod_exp(result: &mut BigNum, base: &BigNum, exp: &BigNum, m: &BigNum) -> Result<()> {
    if m.is_zero() {
        return Err(Error::fatal(FailureCode::DivideByZero));
    }
    if m.eq_word(1) {
        result.set_zero();
        return Ok(());
    }
    let cap = m.size();

    let mut b = BigNum::with_capacity(cap);
    div_rem(None, Some(&mut b), base, m)?;

    let mut table: Vec<BigNum> = Vec::with_capacity(TABLE_SIZE);
    table.push(BigNum::from_word(1, cap));
    for i in 1..TABLE_SIZE {
        let mut next = BigNum::with_capacity(cap);
        mod_mult(&mut next, &table[i - 1], &b, m)?;
        table.push(next);
    }

    let mut acc = BigNum::from_word(1, cap);
    let mut tmp = BigNum::with_capacity(cap);
    let mut entry = BigNum::with_capacity(cap);
    let windows = (exp.bits_used() + WINDOW_BITS - 1) / WINDOW_BITS;
    for w in (0..windows).rev() {
        for _ in 0..WINDOW_BITS {
            mod_mult(&mut tmp, &acc, &acc, m)?;
            core::mem::swap(&mut acc, &mut tmp);
        }
        let mut index = 0usize;
        for bit in (0..WINDOW_BITS).rev() {
            index = (index << 1) | exp.bit_test(w * WINDOW_BITS + bit) as usize;
        }
        select_entry(&mut entry, &table, index);
        mod_mult(&mut tmp, &acc, &entry, m)?;
        core::mem::swap(&mut acc, &mut tmp);
    }
    result.copy_from(&acc)
}

/// Signed magnitude used by the extended Euclidean algorithm
struct Signed {
    mag: BigNum,
    negative: bool,
}

/// `result = a^-1 mod m`
///
/// Returns `Ok(false)` and leaves `result` untouched when `a` has no
/// inverse; only a zero modulus is fatal.
#[track_caller]
pub fn mod_inverse(result: &mut BigNum, a: &BigNum, m: &BigNum) -> Result<bool> {
    if m.is_zero() {
        return Err(Error::fatal(FailureCode::DivideByZero));
    }
    let cap = 2 * m.size().max(a.size()) + 2;

    let mut r0 = m.resized(cap)?;
    let mut r1 = BigNum::with_capacity(cap);
    div_rem(None, Some(&mut r1), a, m)?;
    let mut t0 = Signed {
        mag: BigNum::with_capacity(cap),
        negative: false,
    };
    let mut t1 = Signed {
        mag: BigNum::from_word(1, cap),
        negative: false,
    };

    let mut q = BigNum::with_capacity(cap);
    let mut r2 = BigNum::with_capacity(cap);
    let mut qt = BigNum::with_capacity(cap);
    while !r1.is_zero() {
        div_rem(Some(&mut q), Some(&mut r2), &r0, &r1)?;
        mul(&mut qt, &q, &t1.mag)?;

        // t2 = t0 - q*t1
        let mut t2 = Signed {
            mag: BigNum::with_capacity(cap),
            negative: false,
        };
        if t0.negative != t1.negative {
            add(&mut t2.mag, &t0.mag, &qt)?;
            t2.negative = t0.negative;
        } else if compare(&t0.mag, &qt) != Ordering::Less {
            sub(&mut t2.mag, &t0.mag, &qt)?;
            t2.negative = t0.negative;
        } else {
            sub(&mut t2.mag, &qt, &t0.mag)?;
            t2.negative = !t0.negative;
        }

        core::mem::swap(&mut r0, &mut r1);
        core::mem::swap(&mut r1, &mut r2);
        t0 = t1;
        t1 = t2;
    }

    if !r0.eq_word(1) {
        return Ok(false);
    }

    let mut reduced = BigNum::with_capacity(cap);
    div_rem(None, Some(&mut reduced), &t0.mag, m)?;
    if t0.negative && !reduced.is_zero() {
        let mut pos = BigNum::with_capacity(cap);
        sub(&mut pos, m, &reduced)?;
        result.copy_from(&pos)?;
    } else {
        result.copy_from(&reduced)?;
    }
    Ok(true)
}
