//! Fixed-capacity multi-precision unsigned integers
//!
//! A [`BigNum`] owns a word buffer whose length is fixed when the value is
//! created; arithmetic writes into a caller-provided result and never grows
//! it. Words are little-endian (least significant word first) and the value
//! is kept normalized: `size` counts significant words, and every word at or
//! above `size` is zero.
//!
//! A result too small for the value written into it is a contract violation
//! by the caller and is reported as a fatal [`FailureCode::Allocation`].

use core::cmp::Ordering;
use core::fmt;

use tpm2crypt_api::FailureCode;
use tpm2crypt_internal::endian::u64_from_be_partial;
use tpm2crypt_params::traditional::rsa::MAX_RSA_KEY_BITS;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

mod arith;
mod div;
mod modular;

pub use arith::{add, add_word, mul, shift_left, shift_right, sub, sub_word};
pub use div::{div_rem, gcd, mod_word};
pub use modular::{mod_exp, mod_inverse, mod_mult};

/// Limb type
pub type Word = u64;

/// Bits per limb
pub const WORD_BITS: usize = 64;

/// Bytes per limb
pub const WORD_BYTES: usize = 8;

/// Words in the largest RSA modulus
pub const MAX_RSA_WORDS: usize = MAX_RSA_KEY_BITS / WORD_BITS;

/// Words in the largest intermediate product (two moduli plus carry room)
pub(crate) const MAX_PRODUCT_WORDS: usize = 2 * MAX_RSA_WORDS + 2;

/// Number of words needed to hold `bits` bits
pub const fn words_for_bits(bits: usize) -> usize {
    (bits + WORD_BITS - 1) / WORD_BITS
}

/// Number of words needed to hold `bytes` bytes
pub const fn words_for_bytes(bytes: usize) -> usize {
    (bytes + WORD_BYTES - 1) / WORD_BYTES
}

/// Unsigned multi-precision integer with fixed capacity
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BigNum {
    words: Vec<Word>,
    size: usize,
}

impl BigNum {
    /// Zero with room for `words` limbs
    pub fn with_capacity(words: usize) -> Self {
        Self {
            words: vec![0; words.max(1)],
            size: 0,
        }
    }

    /// Zero with room for `bits` bits
    pub fn with_bits(bits: usize) -> Self {
        Self::with_capacity(words_for_bits(bits))
    }

    /// A single-word value with room for `capacity` limbs
    pub fn from_word(value: Word, capacity: usize) -> Self {
        let mut out = Self::with_capacity(capacity);
        out.set_word(value);
        out
    }

    /// Parse big-endian bytes into a value exactly as wide as the input
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut out = Self::with_capacity(words_for_bytes(bytes.len()));
        out.load_be_bytes(bytes);
        out
    }

    /// Parse big-endian bytes into a value with the given capacity
    #[track_caller]
    pub fn from_be_bytes_with_capacity(bytes: &[u8], capacity: usize) -> Result<Self> {
        let mut out = Self::with_capacity(capacity);
        out.set_be_bytes(bytes)?;
        Ok(out)
    }

    /// Replace the value with big-endian `bytes`; leading zero bytes are
    /// accepted and ignored
    #[track_caller]
    pub fn set_be_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[first..];
        if words_for_bytes(bytes.len()) > self.words.len() {
            return Err(Error::fatal(FailureCode::Allocation));
        }
        self.load_be_bytes(bytes);
        Ok(())
    }

    // Caller guarantees `bytes` fits the capacity
    fn load_be_bytes(&mut self, bytes: &[u8]) {
        self.words.as_mut_slice().zeroize();
        for (limb, chunk) in self.words.iter_mut().zip(bytes.rchunks(WORD_BYTES)) {
            *limb = u64_from_be_partial(chunk);
        }
        self.size = words_for_bytes(bytes.len()).min(self.words.len());
        self.normalize();
    }

    /// Minimal big-endian encoding; zero encodes as no bytes
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let len = (self.bits_used() + 7) / 8;
        let mut out = vec![0u8; len];
        self.write_be_bytes_unchecked(&mut out);
        out
    }

    /// Big-endian encoding left-padded to exactly `size` bytes
    pub fn to_be_bytes_padded(&self, size: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; size];
        self.write_be_bytes(&mut out)?;
        Ok(out)
    }

    /// Write the value big-endian into all of `out`, left-padded with zeros
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<()> {
        let needed = (self.bits_used() + 7) / 8;
        if needed > out.len() {
            return Err(Error::Length {
                context: "BigNum encoding",
                expected: needed,
                actual: out.len(),
            });
        }
        self.write_be_bytes_unchecked(out);
        Ok(())
    }

    fn write_be_bytes_unchecked(&self, out: &mut [u8]) {
        let len = out.len();
        for (i, byte) in out.iter_mut().enumerate() {
            let pos = len - 1 - i;
            let word = pos / WORD_BYTES;
            *byte = if word < self.size {
                (self.words[word] >> ((pos % WORD_BYTES) * 8)) as u8
            } else {
                0
            };
        }
    }

    /// Number of limbs this value can hold
    pub fn capacity(&self) -> usize {
        self.words.len()
    }

    /// Number of significant limbs
    pub fn size(&self) -> usize {
        self.size
    }

    /// Significant limbs, least significant first
    pub fn words(&self) -> &[Word] {
        &self.words[..self.size]
    }

    /// Limb `i`, or zero beyond the significant size
    pub fn word(&self, i: usize) -> Word {
        if i < self.size {
            self.words[i]
        } else {
            0
        }
    }

    /// True when the value is zero
    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    /// True when the value equals the single word `w`
    pub fn eq_word(&self, w: Word) -> bool {
        match self.size {
            0 => w == 0,
            1 => self.words[0] == w,
            _ => false,
        }
    }

    /// Number of bits up to and including the most significant set bit
    pub fn bits_used(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        let top = self.words[self.size - 1];
        self.size * WORD_BITS - top.leading_zeros() as usize
    }

    /// Test bit `bit`; bits beyond the capacity read as zero
    pub fn bit_test(&self, bit: usize) -> bool {
        let word = bit / WORD_BITS;
        word < self.size && (self.words[word] >> (bit % WORD_BITS)) & 1 == 1
    }

    /// Set bit `bit`
    #[track_caller]
    pub fn bit_set(&mut self, bit: usize) -> Result<()> {
        let word = bit / WORD_BITS;
        if word >= self.words.len() {
            return Err(Error::fatal(FailureCode::Allocation));
        }
        self.words[word] |= 1 << (bit % WORD_BITS);
        if word >= self.size {
            self.size = word + 1;
        }
        Ok(())
    }

    /// Keep only the low `bits` bits
    pub fn mask_bits(&mut self, bits: usize) {
        let full = bits / WORD_BITS;
        let partial = bits % WORD_BITS;
        for i in 0..self.words.len() {
            if i > full || (i == full && partial == 0) {
                self.words[i] = 0;
            } else if i == full {
                self.words[i] &= (1u64 << partial) - 1;
            }
        }
        self.normalize();
    }

    /// Set to zero
    pub fn set_zero(&mut self) {
        self.words.as_mut_slice().zeroize();
        self.size = 0;
    }

    /// Set to a single-word value
    pub fn set_word(&mut self, value: Word) {
        self.set_zero();
        self.words[0] = value;
        self.normalize_from(1);
    }

    /// Copy the value of `src`; fatal if it does not fit
    #[track_caller]
    pub fn copy_from(&mut self, src: &BigNum) -> Result<()> {
        if src.size > self.words.len() {
            return Err(Error::fatal(FailureCode::Allocation));
        }
        self.words.as_mut_slice().zeroize();
        self.words[..src.size].copy_from_slice(&src.words[..src.size]);
        self.size = src.size;
        Ok(())
    }

    /// Copy of this value with a different capacity
    #[track_caller]
    pub fn resized(&self, capacity: usize) -> Result<BigNum> {
        let mut out = BigNum::with_capacity(capacity);
        out.copy_from(self)?;
        Ok(out)
    }

    /// Trim high-order zero limbs
    pub fn normalize(&mut self) {
        let mut size = self.size.min(self.words.len());
        while size > 0 && self.words[size - 1] == 0 {
            size -= 1;
        }
        self.size = size;
    }

    /// Normalize assuming no limb at or above `size` is non-zero
    pub(crate) fn normalize_from(&mut self, size: usize) {
        self.size = size.min(self.words.len());
        self.normalize();
    }

    /// Write limbs from a scratch slice, failing if a non-zero limb does
    /// not fit
    #[track_caller]
    pub(crate) fn set_words(&mut self, src: &[Word]) -> Result<()> {
        let mut used = src.len();
        while used > 0 && src[used - 1] == 0 {
            used -= 1;
        }
        if used > self.words.len() {
            return Err(Error::fatal(FailureCode::Allocation));
        }
        self.words.as_mut_slice().zeroize();
        self.words[..used].copy_from_slice(&src[..used]);
        self.size = used;
        Ok(())
    }

    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }
}

/// Compare two values
///
/// The loop visits every limb up to the larger capacity without exiting
/// early, so running time depends on the declared widths rather than on
/// where the operands first differ.
pub fn compare(a: &BigNum, b: &BigNum) -> Ordering {
    let len = a.capacity().max(b.capacity());
    // 1 = a greater, -1 = b greater, decided at the most significant
    // differing limb
    let mut result: i32 = 0;
    for i in (0..len).rev() {
        let x = if i < a.capacity() { a.words[i] } else { 0 };
        let y = if i < b.capacity() { b.words[i] } else { 0 };
        let gt = (x > y) as i32;
        let lt = (x < y) as i32;
        let undecided = (result == 0) as i32;
        result += undecided * (gt - lt);
    }
    result.cmp(&0)
}

/// Compare a value with a single word
pub fn compare_word(a: &BigNum, w: Word) -> Ordering {
    if a.size > 1 {
        return Ordering::Greater;
    }
    a.word(0).cmp(&w)
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for BigNum {}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl fmt::Debug for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNum(0x")?;
        if self.size == 0 {
            write!(f, "0")?;
        }
        for (i, w) in self.words().iter().rev().enumerate() {
            if i == 0 {
                write!(f, "{:x}", w)?;
            } else {
                write!(f, "{:016x}", w)?;
            }
        }
        write!(f, ", cap={})", self.capacity())
    }
}
