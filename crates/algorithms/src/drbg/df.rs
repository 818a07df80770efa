//! `Block_Cipher_df` (SP 800-90A, 10.3.2) with AES-256

use tpm2crypt_common::{SecretBuffer, SecretVec};
use tpm2crypt_params::utils::drbg::{DRBG_KEY_SIZE_BYTES, DRBG_SEED_SIZE_BYTES};
use tpm2crypt_params::utils::symmetric::AES_BLOCK_SIZE;
use zeroize::Zeroize;

use crate::block::Aes256;

/// `BCC`: CBC-MAC of `data` (a whole number of blocks) under `cipher`
fn bcc(cipher: &Aes256, data: &[u8]) -> [u8; AES_BLOCK_SIZE] {
    let mut chain = [0u8; AES_BLOCK_SIZE];
    for block in data.chunks_exact(AES_BLOCK_SIZE) {
        for (c, b) in chain.iter_mut().zip(block) {
            *c ^= b;
        }
        cipher.encrypt_block(&mut chain);
    }
    chain
}

/// Condition `input` down to exactly `seedlen` bytes
pub fn block_cipher_df(input: &[u8]) -> SecretBuffer<DRBG_SEED_SIZE_BYTES> {
    // IV || L || N || input || 0x80, zero-padded to the block size
    let mut s = SecretVec::new(Vec::with_capacity(input.len() + 3 * AES_BLOCK_SIZE));
    s.extend_from_slice(&[0u8; AES_BLOCK_SIZE]);
    s.extend_from_slice(&(input.len() as u32).to_be_bytes());
    s.extend_from_slice(&(DRBG_SEED_SIZE_BYTES as u32).to_be_bytes());
    s.extend_from_slice(input);
    s.extend_from_slice(&[0x80]);
    let padding = (AES_BLOCK_SIZE - s.len() % AES_BLOCK_SIZE) % AES_BLOCK_SIZE;
    s.extend_from_slice(&[0u8; AES_BLOCK_SIZE][..padding]);

    let mut k = [0u8; DRBG_KEY_SIZE_BYTES];
    for (i, b) in k.iter_mut().enumerate() {
        *b = i as u8;
    }
    let cipher = Aes256::new(&k);

    let mut temp = [0u8; DRBG_SEED_SIZE_BYTES];
    for (i, chunk) in temp.chunks_exact_mut(AES_BLOCK_SIZE).enumerate() {
        s.as_mut_slice()[..4].copy_from_slice(&(i as u32).to_be_bytes());
        chunk.copy_from_slice(&bcc(&cipher, s.as_slice()));
    }

    k.copy_from_slice(&temp[..DRBG_KEY_SIZE_BYTES]);
    let mut x = [0u8; AES_BLOCK_SIZE];
    x.copy_from_slice(&temp[DRBG_KEY_SIZE_BYTES..]);
    let cipher = Aes256::new(&k);

    let mut out = [0u8; DRBG_SEED_SIZE_BYTES];
    for chunk in out.chunks_exact_mut(AES_BLOCK_SIZE) {
        cipher.encrypt_block(&mut x);
        chunk.copy_from_slice(&x);
    }
    let result = SecretBuffer::new(out);
    out.zeroize();
    temp.zeroize();
    k.zeroize();
    x.zeroize();
    result
}
