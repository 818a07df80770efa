//! AES-256 encryption (FIPS 197)
//!
//! The S-box is computed as an inversion in GF(2^8) followed by the affine
//! map rather than read from a table, so no lookup is indexed by secret data.

use std::sync::atomic::{compiler_fence, Ordering};

use tpm2crypt_common::SecretBuffer;
use tpm2crypt_internal::endian::{u32_from_be_bytes, u32_to_be_bytes};
use tpm2crypt_params::utils::symmetric::{AES256_KEY_SIZE, AES256_ROUNDS, AES_BLOCK_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop};

const RCON: [u32; 8] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000,
];

const SCHEDULE_WORDS: usize = 4 * (AES256_ROUNDS + 1);
const SCHEDULE_BYTES: usize = 4 * SCHEDULE_WORDS;

/// Multiply in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1
#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = a >> 7;
        a <<= 1;
        a ^= hi * 0x1b;
        b >>= 1;
    }
    p
}

/// `x^254`, which is `x^-1` for non-zero `x` and zero for zero
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let x2 = gf_mul(x, x);
    let x4 = gf_mul(x2, x2);
    let x8 = gf_mul(x4, x4);
    let x16 = gf_mul(x8, x8);
    let x32 = gf_mul(x16, x16);
    let x64 = gf_mul(x32, x32);
    let x128 = gf_mul(x64, x64);
    let mut y = gf_mul(x128, x64);
    y = gf_mul(y, x32);
    y = gf_mul(y, x16);
    y = gf_mul(y, x8);
    y = gf_mul(y, x4);
    gf_mul(y, x2)
}

#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    let b = u32_to_be_bytes(word);
    u32_from_be_bytes(&[sbox(b[0]), sbox(b[1]), sbox(b[2]), sbox(b[3])])
}

#[inline(always)]
fn mul2(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7) * 0x1b)
}

fn sub_bytes(state: &mut [u8; AES_BLOCK_SIZE]) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
    compiler_fence(Ordering::SeqCst);
}

fn shift_rows(state: &mut [u8; AES_BLOCK_SIZE]) {
    let t = *state;
    for c in 0..4 {
        for r in 1..4 {
            state[4 * c + r] = t[4 * ((c + r) % 4) + r];
        }
    }
}

fn mix_columns(state: &mut [u8; AES_BLOCK_SIZE]) {
    for col in state.chunks_exact_mut(4) {
        let (s0, s1, s2, s3) = (col[0], col[1], col[2], col[3]);
        col[0] = mul2(s0) ^ mul2(s1) ^ s1 ^ s2 ^ s3;
        col[1] = s0 ^ mul2(s1) ^ mul2(s2) ^ s2 ^ s3;
        col[2] = s0 ^ s1 ^ mul2(s2) ^ mul2(s3) ^ s3;
        col[3] = mul2(s0) ^ s0 ^ s1 ^ s2 ^ mul2(s3);
    }
}

fn add_round_key(state: &mut [u8; AES_BLOCK_SIZE], round_key: &[u8]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

/// AES-256 with an expanded key schedule
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256 {
    round_keys: SecretBuffer<SCHEDULE_BYTES>,
}

impl Aes256 {
    /// Expand `key`
    pub fn new(key: &[u8; AES256_KEY_SIZE]) -> Self {
        let mut w = [0u32; SCHEDULE_WORDS];
        for (i, chunk) in key.chunks_exact(4).enumerate() {
            w[i] = u32_from_be_bytes(chunk);
        }
        for i in 8..SCHEDULE_WORDS {
            let mut temp = w[i - 1];
            if i % 8 == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ RCON[i / 8];
            } else if i % 8 == 4 {
                temp = sub_word(temp);
            }
            w[i] = w[i - 8] ^ temp;
        }

        let mut bytes = [0u8; SCHEDULE_BYTES];
        for (i, word) in w.iter().enumerate() {
            bytes[4 * i..4 * i + 4].copy_from_slice(&u32_to_be_bytes(*word));
        }
        w.zeroize();
        let round_keys = SecretBuffer::new(bytes);
        bytes.zeroize();
        Aes256 { round_keys }
    }

    /// Encrypt one block in place
    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let rk = self.round_keys.as_slice();
        add_round_key(block, &rk[..AES_BLOCK_SIZE]);
        for round in 1..AES256_ROUNDS {
            sub_bytes(block);
            shift_rows(block);
            mix_columns(block);
            add_round_key(block, &rk[round * AES_BLOCK_SIZE..(round + 1) * AES_BLOCK_SIZE]);
        }
        sub_bytes(block);
        shift_rows(block);
        add_round_key(block, &rk[AES256_ROUNDS * AES_BLOCK_SIZE..]);
    }
}
