//! Key derivation functions
//!
//! * [`kdfa`]: SP 800-108 counter mode with HMAC, the TPM's KDFa
//! * [`kdfe`]: SP 800-56A concatenation KDF, the TPM's KDFe
//! * [`mgf1`]: PKCS #1 mask generation
//!
//! Labels are treated as C strings: a terminating zero octet is appended
//! unless the label already ends in one.

use tpm2crypt_api::HashAlg;
use tpm2crypt_common::SecretVec;

use crate::error::{validate, Result};
use crate::hash::HashState;
use crate::mac::Hmac;

fn absorb_label(label: &[u8], mut update: impl FnMut(&[u8])) {
    update(label);
    if label.last() != Some(&0) {
        update(&[0]);
    }
}

fn finish(mut out: SecretVec, bits: u32) -> SecretVec {
    let bytes = ((bits as usize) + 7) / 8;
    out.truncate(bytes);
    if bits % 8 != 0 {
        if let Some(first) = out.as_mut_slice().first_mut() {
            *first &= (1u8 << (bits % 8)) - 1;
        }
    }
    out
}

/// One KDFa block: `HMAC(key, [i] || label || 0 || contextU || contextV || [bits])`
pub fn kdfa_block(
    hash: HashAlg,
    key: &[u8],
    label: &[u8],
    context_u: &[u8],
    context_v: &[u8],
    bits: u32,
    counter: u32,
) -> Result<Vec<u8>> {
    let mut mac = Hmac::new(hash, key)?;
    mac.update_u32(counter);
    absorb_label(label, |d| mac.update(d));
    mac.update(context_u);
    mac.update(context_v);
    mac.update_u32(bits);
    Ok(mac.finalize())
}

/// KDFa producing `bits` bits
///
/// When `bits` is not a whole number of octets the unused high bits of
/// the first octet are cleared.
pub fn kdfa(
    hash: HashAlg,
    key: &[u8],
    label: &[u8],
    context_u: &[u8],
    context_v: &[u8],
    bits: u32,
) -> Result<SecretVec> {
    validate::parameter(bits > 0, "bits", "KDF output must be non-empty")?;
    let bytes = ((bits as usize) + 7) / 8;
    let mut out = SecretVec::new(Vec::with_capacity(bytes + hash.digest_size()));
    let mut counter = 1u32;
    while out.len() < bytes {
        let block = kdfa_block(hash, key, label, context_u, context_v, bits, counter)?;
        out.extend_from_slice(&block);
        counter = counter.wrapping_add(1);
    }
    Ok(finish(out, bits))
}

/// KDFe producing `bits` bits: `Hash([i] || Z || label || 0 || partyU || partyV)`
pub fn kdfe(
    hash: HashAlg,
    z: &[u8],
    label: &[u8],
    party_u: &[u8],
    party_v: &[u8],
    bits: u32,
) -> Result<SecretVec> {
    validate::parameter(bits > 0, "bits", "KDF output must be non-empty")?;
    let bytes = ((bits as usize) + 7) / 8;
    let mut out = SecretVec::new(Vec::with_capacity(bytes + hash.digest_size()));
    let mut counter = 1u32;
    while out.len() < bytes {
        let mut h = HashState::new(hash);
        h.update_u32(counter);
        h.update(z);
        absorb_label(label, |d| h.update(d));
        h.update(party_u);
        h.update(party_v);
        out.extend_from_slice(&h.finalize());
        counter = counter.wrapping_add(1);
    }
    Ok(finish(out, bits))
}

/// MGF1 mask of `len` octets
pub fn mgf1(hash: HashAlg, seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + hash.digest_size());
    let mut counter = 0u32;
    while out.len() < len {
        let mut h = HashState::new(hash);
        h.update(seed);
        h.update_u32(counter);
        out.extend_from_slice(&h.finalize());
        counter = counter.wrapping_add(1);
    }
    out.truncate(len);
    out
}
