//! RSA key generation (FIPS 186-4, B.3.3 style probable primes)

use core::cmp::Ordering;

use tpm2crypt_common::SecretVec;
use tpm2crypt_params::traditional::rsa::{
    MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS, RSA_DEFAULT_PUBLIC_EXPONENT, RSA_MILLER_RABIN_ROUNDS,
};

use super::{private_exponent, RsaPrivateKey, RsaPublicKey};
use crate::drbg::RandomSource;
use crate::error::{validate, Error, Result};
use crate::math::MathBackend;

/// Odd primes below 1000, for trial division
const SMALL_PRIMES: [u16; 167] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59,
    61, 67, 71, 73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137,
    139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223, 227,
    229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307, 311, 313,
    317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509,
    521, 523, 541, 547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617,
    619, 631, 641, 643, 647, 653, 659, 661, 673, 677, 683, 691, 701, 709, 719, 727,
    733, 739, 743, 751, 757, 761, 769, 773, 787, 797, 809, 811, 821, 823, 827, 829,
    839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919, 929, 937, 941, 947,
    953, 967, 971, 977, 983, 991, 997,
];

/// Upper bound on candidates tried for one prime before giving up
const MAX_PRIME_CANDIDATES: usize = 20_000;

/// True when `n` has no factor in [`SMALL_PRIMES`] (or is one of them)
fn passes_sieve<B: MathBackend + ?Sized>(b: &B, n: &B::Int) -> Result<bool> {
    for &p in SMALL_PRIMES.iter() {
        if b.mod_word(n, u64::from(p))? == 0 {
            return Ok(b.eq_word(n, u64::from(p)));
        }
    }
    Ok(true)
}

/// Uniform value in `[2, n - 2]` for `n > 4`
fn random_witness<B, R>(b: &B, n: &B::Int, rng: &mut R) -> Result<B::Int>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let bytes = (b.bits(n) + 7) / 8 + 8;
    let mut buf = SecretVec::zeroed(bytes);
    rng.fill(buf.as_mut_slice())?;
    let range = b.sub(n, &b.from_word(3))?;
    let w = b.reduce(&b.from_be_bytes(buf.as_slice()), &range)?;
    b.add(&w, &b.from_word(2))
}

/// Miller-Rabin with `rounds` random bases
pub fn is_probable_prime<B, R>(b: &B, n: &B::Int, rounds: usize, rng: &mut R) -> Result<bool>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    if b.compare(n, &b.from_word(5)) == Ordering::Less {
        return Ok(b.eq_word(n, 2) || b.eq_word(n, 3));
    }
    if !b.bit_test(n, 0) {
        return Ok(false);
    }
    let one = b.from_word(1);
    let n_minus_1 = b.sub(n, &one)?;
    let mut s = 0;
    while !b.bit_test(&n_minus_1, s) {
        s += 1;
    }
    let d = b.shift_right(&n_minus_1, s)?;

    'witness: for _ in 0..rounds {
        let a = random_witness(b, n, rng)?;
        let mut x = b.mod_exp(&a, &d, n)?;
        if b.eq_word(&x, 1) || b.compare(&x, &n_minus_1) == Ordering::Equal {
            continue;
        }
        for _ in 1..s {
            x = b.mod_mult(&x, &x, n)?;
            if b.compare(&x, &n_minus_1) == Ordering::Equal {
                continue 'witness;
            }
        }
        return Ok(false);
    }
    Ok(true)
}

/// Random prime of exactly `bits` bits with the top two bits set and
/// `gcd(e, p - 1) == 1`
pub fn generate_prime<B, R>(b: &B, bits: usize, e: u32, rng: &mut R) -> Result<B::Int>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    let bytes = (bits + 7) / 8;
    let mut buf = SecretVec::zeroed(bytes);
    let e_int = b.from_word(u64::from(e));
    let one = b.from_word(1);
    for _ in 0..MAX_PRIME_CANDIDATES {
        rng.fill(buf.as_mut_slice())?;
        {
            let raw = buf.as_mut_slice();
            let excess = bytes * 8 - bits;
            raw[0] &= 0xffu8 >> excess;
            // top two bits, so that p * q has exactly twice the bits
            let top = 7 - excess;
            raw[0] |= 1 << top;
            if top == 0 {
                raw[1] |= 0x80;
            } else {
                raw[0] |= 1 << (top - 1);
            }
            raw[bytes - 1] |= 1;
        }
        let candidate = b.from_be_bytes(buf.as_slice());
        if !passes_sieve(b, &candidate)? {
            continue;
        }
        let p_minus_1 = b.sub(&candidate, &one)?;
        if !b.eq_word(&b.gcd(&e_int, &p_minus_1)?, 1) {
            continue;
        }
        if is_probable_prime(b, &candidate, RSA_MILLER_RABIN_ROUNDS, rng)? {
            return Ok(candidate);
        }
    }
    Err(Error::NoResult {
        operation: "prime generation",
    })
}

/// Fresh RSA key with a `bits`-bit modulus
///
/// An exponent of zero selects 65537. The primes differ in their top
/// 100 bits, as FIPS 186-4 requires.
pub fn generate_key<B, R>(b: &B, bits: usize, exponent: u32, rng: &mut R) -> Result<RsaPrivateKey>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    validate::parameter(
        (MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&bits) && bits % 2 == 0,
        "bits",
        "unsupported modulus size",
    )?;
    let e = if exponent == 0 {
        RSA_DEFAULT_PUBLIC_EXPONENT
    } else {
        exponent
    };
    validate::parameter(e & 1 == 1 && e > 1, "exponent", "must be odd and > 1")?;

    let half = bits / 2;
    let p = generate_prime(b, half, e, rng)?;
    let min_gap = b.shift_left(&b.from_word(1), half - 100)?;
    let q = loop {
        let q = generate_prime(b, half, e, rng)?;
        let gap = match b.compare(&p, &q) {
            Ordering::Greater => b.sub(&p, &q)?,
            _ => b.sub(&q, &p)?,
        };
        if b.compare(&gap, &min_gap) == Ordering::Greater {
            break q;
        }
    };

    let n = b.mul(&p, &q)?;
    let d = private_exponent(b, &p, &q, e)?;
    let public = RsaPublicKey::new(&b.to_be_bytes(&n), e)?;
    validate::invariant(
        public.bits() == bits,
        tpm2crypt_api::FailureCode::Internal,
    )?;
    let p_bytes = SecretVec::new(b.to_be_bytes(&p));
    let q_bytes = SecretVec::new(b.to_be_bytes(&q));
    let d_bytes = SecretVec::new(b.to_be_bytes(&d));
    RsaPrivateKey::from_parts(b, public, p_bytes.as_slice(), q_bytes.as_slice(), d_bytes.as_slice())
}
