//! PKCS #1 v2.2 encoding methods (RFC 8017)
//!
//! Pure byte transforms around the RSA primitive. Encoders take the
//! modulus size; decoders and verifiers take the recovered encoded message.

use subtle::{Choice, ConstantTimeEq};
use tpm2crypt_api::HashAlg;
use tpm2crypt_common::SecretVec;
use tpm2crypt_internal::ct_eq;
use tpm2crypt_params::traditional::rsa::{
    DIGEST_INFO_SHA1, DIGEST_INFO_SHA256, DIGEST_INFO_SHA384, DIGEST_INFO_SHA512,
};

use crate::drbg::RandomSource;
use crate::error::{validate, Error, Result};
use crate::hash::{digest, digest_parts};
use crate::kdf::mgf1;

const PKCS1_MIN_PADDING: usize = 8;

fn xor_in_place(data: &mut [u8], mask: &[u8]) {
    for (d, m) in data.iter_mut().zip(mask) {
        *d ^= m;
    }
}

/// DER DigestInfo prefix for `hash`
pub fn digest_info_prefix(hash: HashAlg) -> &'static [u8] {
    match hash {
        HashAlg::Sha1 => DIGEST_INFO_SHA1,
        HashAlg::Sha256 => DIGEST_INFO_SHA256,
        HashAlg::Sha384 => DIGEST_INFO_SHA384,
        HashAlg::Sha512 => DIGEST_INFO_SHA512,
    }
}

// ----------------------------------------------------------------------
// RSAES-OAEP
// ----------------------------------------------------------------------

/// EME-OAEP encoding into `k` bytes
pub fn oaep_encode<R: RandomSource + ?Sized>(
    hash: HashAlg,
    label: &[u8],
    message: &[u8],
    k: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let h_len = hash.digest_size();
    validate::parameter(k >= 2 * h_len + 2, "modulus", "too small for OAEP with this hash")?;
    validate::max_length("OAEP message", message.len(), k - 2 * h_len - 2)?;

    let db_len = k - h_len - 1;
    let mut db = SecretVec::zeroed(db_len);
    {
        let db = db.as_mut_slice();
        db[..h_len].copy_from_slice(&digest(hash, label));
        db[db_len - message.len() - 1] = 0x01;
        db[db_len - message.len()..].copy_from_slice(message);
    }

    let mut seed = SecretVec::zeroed(h_len);
    rng.fill(seed.as_mut_slice())?;

    xor_in_place(db.as_mut_slice(), &mgf1(hash, seed.as_slice(), db_len));
    xor_in_place(seed.as_mut_slice(), &mgf1(hash, db.as_slice(), h_len));

    let mut em = Vec::with_capacity(k);
    em.push(0);
    em.extend_from_slice(seed.as_slice());
    em.extend_from_slice(db.as_slice());
    Ok(em)
}

/// EME-OAEP decoding of a `k`-byte encoded message
///
/// Every failure is reported the same way.
pub fn oaep_decode(hash: HashAlg, label: &[u8], em: &[u8]) -> Result<SecretVec> {
    let h_len = hash.digest_size();
    let k = em.len();
    let bad = Error::Decryption { scheme: "OAEP" };
    if k < 2 * h_len + 2 {
        return Err(bad);
    }

    let mut seed = SecretVec::from_slice(&em[1..1 + h_len]);
    let mut db = SecretVec::from_slice(&em[1 + h_len..]);
    xor_in_place(seed.as_mut_slice(), &mgf1(hash, db.as_slice(), h_len));
    xor_in_place(db.as_mut_slice(), &mgf1(hash, seed.as_slice(), k - h_len - 1));

    let db = db.as_slice();
    let mut good: Choice = em[0].ct_eq(&0);
    good &= Choice::from(ct_eq(&db[..h_len], &digest(hash, label)) as u8);

    // find the 0x01 separator after the zero padding without an early exit
    let mut looking = Choice::from(1u8);
    let mut index = 0usize;
    for (i, &byte) in db.iter().enumerate().skip(h_len) {
        let is_one = byte.ct_eq(&1);
        let is_zero = byte.ct_eq(&0);
        let found = looking & is_one;
        index = if bool::from(found) { i } else { index };
        good &= !(looking & !is_one & !is_zero);
        looking &= !is_one;
    }
    good &= !looking;

    if !bool::from(good) {
        return Err(bad);
    }
    Ok(SecretVec::from_slice(&db[index + 1..]))
}

// ----------------------------------------------------------------------
// RSAES-PKCS1-v1_5
// ----------------------------------------------------------------------

/// EME-PKCS1-v1_5 encoding into `k` bytes
pub fn pkcs1v15_encrypt_encode<R: RandomSource + ?Sized>(
    message: &[u8],
    k: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    validate::parameter(k >= PKCS1_MIN_PADDING + 3, "modulus", "too small for PKCS#1 v1.5")?;
    validate::max_length("PKCS#1 v1.5 message", message.len(), k - PKCS1_MIN_PADDING - 3)?;

    let ps_len = k - message.len() - 3;
    let mut em = vec![0u8; k];
    em[1] = 0x02;
    {
        let ps = &mut em[2..2 + ps_len];
        rng.fill(ps)?;
        for byte in ps.iter_mut() {
            while *byte == 0 {
                let mut one = [0u8; 1];
                rng.fill(&mut one)?;
                *byte = one[0];
            }
        }
    }
    em[2 + ps_len] = 0;
    em[3 + ps_len..].copy_from_slice(message);
    Ok(em)
}

/// EME-PKCS1-v1_5 decoding of a `k`-byte encoded message
pub fn pkcs1v15_encrypt_decode(em: &[u8]) -> Result<SecretVec> {
    let bad = Error::Decryption {
        scheme: "PKCS#1 v1.5",
    };
    if em.len() < PKCS1_MIN_PADDING + 3 {
        return Err(bad);
    }
    let mut good: Choice = em[0].ct_eq(&0) & em[1].ct_eq(&2);
    let mut looking = Choice::from(1u8);
    let mut index = 0usize;
    for (i, &byte) in em.iter().enumerate().skip(2) {
        let is_zero = byte.ct_eq(&0);
        let found = looking & is_zero;
        index = if bool::from(found) { i } else { index };
        looking &= !is_zero;
    }
    good &= !looking;
    good &= Choice::from((index >= 2 + PKCS1_MIN_PADDING) as u8);
    if !bool::from(good) {
        return Err(bad);
    }
    Ok(SecretVec::from_slice(&em[index + 1..]))
}

// ----------------------------------------------------------------------
// RSASSA-PKCS1-v1_5
// ----------------------------------------------------------------------

/// EMSA-PKCS1-v1_5 encoding of a precomputed digest into `k` bytes
pub fn pkcs1v15_sign_encode(hash: HashAlg, digest: &[u8], k: usize) -> Result<Vec<u8>> {
    validate::length("RSASSA digest", digest.len(), hash.digest_size())?;
    let prefix = digest_info_prefix(hash);
    let t_len = prefix.len() + digest.len();
    validate::parameter(
        k >= t_len + PKCS1_MIN_PADDING + 3,
        "modulus",
        "too small for this DigestInfo",
    )?;

    let mut em = vec![0xffu8; k];
    em[0] = 0x00;
    em[1] = 0x01;
    em[k - t_len - 1] = 0x00;
    em[k - t_len..k - digest.len()].copy_from_slice(prefix);
    em[k - digest.len()..].copy_from_slice(digest);
    Ok(em)
}

// ----------------------------------------------------------------------
// RSASSA-PSS
// ----------------------------------------------------------------------

fn pss_lengths(mod_bits: usize) -> (usize, usize) {
    let em_bits = mod_bits - 1;
    (em_bits, (em_bits + 7) / 8)
}

/// EMSA-PSS encoding; the result is `ceil((mod_bits - 1) / 8)` bytes
///
/// The salt is as long as the digest, or as long as fits when the
/// modulus is too small for that.
pub fn pss_encode<R: RandomSource + ?Sized>(
    hash: HashAlg,
    digest: &[u8],
    mod_bits: usize,
    rng: &mut R,
) -> Result<Vec<u8>> {
    let h_len = hash.digest_size();
    validate::length("PSS digest", digest.len(), h_len)?;
    let (em_bits, em_len) = pss_lengths(mod_bits);
    validate::parameter(em_len >= h_len + 2, "modulus", "too small for PSS with this hash")?;
    let s_len = h_len.min(em_len - h_len - 2);

    let mut salt = vec![0u8; s_len];
    rng.fill(&mut salt)?;
    let h = digest_parts(hash, &[&[0u8; 8], digest, &salt]);

    let db_len = em_len - h_len - 1;
    let mut em = vec![0u8; em_len];
    em[db_len - s_len - 1] = 0x01;
    em[db_len - s_len..db_len].copy_from_slice(&salt);
    xor_in_place(&mut em[..db_len], &mgf1(hash, &h, db_len));
    em[0] &= 0xffu8 >> (8 * em_len - em_bits);
    em[db_len..db_len + h_len].copy_from_slice(&h);
    em[em_len - 1] = 0xbc;
    Ok(em)
}

/// EMSA-PSS verification accepting any salt length
pub fn pss_verify(hash: HashAlg, digest: &[u8], em: &[u8], mod_bits: usize) -> Result<()> {
    let h_len = hash.digest_size();
    let bad = Error::Signature { algorithm: "RSASSA-PSS" };
    let (em_bits, em_len) = pss_lengths(mod_bits);
    if digest.len() != h_len || em.len() != em_len || em_len < h_len + 2 {
        return Err(bad);
    }
    if em[em_len - 1] != 0xbc {
        return Err(bad);
    }
    let top_mask = 0xffu8 >> (8 * em_len - em_bits);
    if em[0] & !top_mask != 0 {
        return Err(bad);
    }

    let db_len = em_len - h_len - 1;
    let h = &em[db_len..db_len + h_len];
    let mut db = em[..db_len].to_vec();
    xor_in_place(&mut db, &mgf1(hash, h, db_len));
    db[0] &= top_mask;

    let sep = db.iter().position(|&b| b != 0).ok_or(bad.clone())?;
    if db[sep] != 0x01 {
        return Err(bad);
    }
    let salt = &db[sep + 1..];
    let expected = digest_parts(hash, &[&[0u8; 8], digest, salt]);
    validate::signature(ct_eq(&expected, h), "RSASSA-PSS")
}
