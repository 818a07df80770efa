//! Division (Knuth algorithm D), single-word reduction and GCD

use core::cmp::Ordering;

use tpm2crypt_api::FailureCode;

use super::{compare, BigNum, Word, MAX_PRODUCT_WORDS, WORD_BITS};
use crate::error::{Error, Result};

const MASK: u128 = u64::MAX as u128;

/// Divide the limbs of `a` by the limbs of `d`, writing the quotient and
/// remainder limbs into the scratch slices
///
/// `d` must be normalized (top limb non-zero) and `a.len() >= d.len()`.
/// `q` needs `a.len() - d.len() + 1` limbs and `r` needs `d.len()`.
fn div_words(a: &[Word], d: &[Word], q: &mut [Word], r: &mut [Word]) {
    let m = a.len();
    let n = d.len();

    if n == 1 {
        let divisor = d[0] as u128;
        let mut rem: u128 = 0;
        for i in (0..m).rev() {
            let cur = (rem << 64) | a[i] as u128;
            q[i] = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        r[0] = rem as u64;
        return;
    }

    // D1: normalize so the divisor's top bit is set
    let s = d[n - 1].leading_zeros() as usize;
    let mut vn = [0 as Word; MAX_PRODUCT_WORDS];
    let mut un = [0 as Word; MAX_PRODUCT_WORDS + 1];
    for i in (1..n).rev() {
        vn[i] = if s == 0 {
            d[i]
        } else {
            (d[i] << s) | (d[i - 1] >> (WORD_BITS - s))
        };
    }
    vn[0] = d[0] << s;
    un[m] = if s == 0 { 0 } else { a[m - 1] >> (WORD_BITS - s) };
    for i in (1..m).rev() {
        un[i] = if s == 0 {
            a[i]
        } else {
            (a[i] << s) | (a[i - 1] >> (WORD_BITS - s))
        };
    }
    un[0] = a[0] << s;

    let top = vn[n - 1] as u128;
    let next = vn[n - 2] as u128;

    for j in (0..=m - n).rev() {
        // D3: estimate the quotient digit
        let num = ((un[j + n] as u128) << 64) | un[j + n - 1] as u128;
        let mut qhat = num / top;
        let mut rhat = num % top;
        // qhat * next is only formed once qhat fits a limb
        while qhat > MASK || qhat * next > ((rhat << 64) | un[j + n - 2] as u128) {
            qhat -= 1;
            rhat += top;
            if rhat > MASK {
                break;
            }
        }

        // D4: multiply and subtract
        let mut k: i128 = 0;
        for i in 0..n {
            let p = qhat * vn[i] as u128;
            let t = un[i + j] as i128 - k - (p & MASK) as i128;
            un[i + j] = t as u64;
            k = (p >> 64) as i128 - (t >> 64);
        }
        let t = un[j + n] as i128 - k;
        un[j + n] = t as u64;

        // D5/D6: add back when the estimate was one too large
        q[j] = qhat as u64;
        if t < 0 {
            q[j] = q[j].wrapping_sub(1);
            let mut carry: u128 = 0;
            for i in 0..n {
                let t = un[i + j] as u128 + vn[i] as u128 + carry;
                un[i + j] = t as u64;
                carry = t >> 64;
            }
            un[j + n] = un[j + n].wrapping_add(carry as u64);
        }
    }

    // D8: unnormalize the remainder
    for i in 0..n {
        r[i] = if s == 0 {
            un[i]
        } else {
            (un[i] >> s) | (un[i + 1] << (WORD_BITS - s))
        };
    }
}

/// `quotient = a / d`, `remainder = a mod d`; either output may be omitted
///
/// Division by zero is fatal.
#[track_caller]
pub fn div_rem(
    quotient: Option<&mut BigNum>,
    remainder: Option<&mut BigNum>,
    a: &BigNum,
    d: &BigNum,
) -> Result<()> {
    if d.is_zero() {
        return Err(Error::fatal(FailureCode::DivideByZero));
    }
    if a.size() > MAX_PRODUCT_WORDS || d.size() > MAX_PRODUCT_WORDS {
        return Err(Error::fatal(FailureCode::Allocation));
    }
    if compare(a, d) == Ordering::Less {
        if let Some(q) = quotient {
            q.set_zero();
        }
        if let Some(r) = remainder {
            r.copy_from(a)?;
        }
        return Ok(());
    }

    let mut q = [0 as Word; MAX_PRODUCT_WORDS];
    let mut r = [0 as Word; MAX_PRODUCT_WORDS];
    let m = a.size();
    let n = d.size();
    div_words(a.words(), d.words(), &mut q[..m - n + 1], &mut r[..n]);

    if let Some(out) = quotient {
        out.set_words(&q[..m - n + 1])?;
    }
    if let Some(out) = remainder {
        out.set_words(&r[..n])?;
    }
    Ok(())
}

/// Divide the raw limbs of a scratch product by `d`, keeping the remainder
#[track_caller]
pub(crate) fn rem_words(result: &mut BigNum, a: &[Word], d: &BigNum) -> Result<()> {
    if d.is_zero() {
        return Err(Error::fatal(FailureCode::DivideByZero));
    }
    let mut m = a.len();
    while m > 0 && a[m - 1] == 0 {
        m -= 1;
    }
    let n = d.size();
    if m < n {
        return result.set_words(&a[..m]);
    }
    let mut q = [0 as Word; MAX_PRODUCT_WORDS];
    let mut r = [0 as Word; MAX_PRODUCT_WORDS];
    div_words(&a[..m], d.words(), &mut q[..m - n + 1], &mut r[..n]);
    result.set_words(&r[..n])
}

/// `a mod w` for a single-word modulus
#[track_caller]
pub fn mod_word(a: &BigNum, w: Word) -> Result<Word> {
    if w == 0 {
        return Err(Error::fatal(FailureCode::DivideByZero));
    }
    let divisor = w as u128;
    let mut rem: u128 = 0;
    for i in (0..a.size()).rev() {
        rem = ((rem << 64) | a.word(i) as u128) % divisor;
    }
    Ok(rem as Word)
}

/// Greatest common divisor of `a` and `b`
#[track_caller]
pub fn gcd(result: &mut BigNum, a: &BigNum, b: &BigNum) -> Result<()> {
    let cap = a.size().max(b.size()).max(1);
    let mut x = a.resized(cap)?;
    let mut y = b.resized(cap)?;
    let mut r = BigNum::with_capacity(cap);
    while !y.is_zero() {
        div_rem(None, Some(&mut r), &x, &y)?;
        core::mem::swap(&mut x, &mut y);
        core::mem::swap(&mut y, &mut r);
    }
    result.copy_from(&x)
}
