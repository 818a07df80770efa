//! The Schnorr `s` computation shared by EC-Schnorr and ECDAA

use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;

/// `s = (k + r·d) mod n`
///
/// Both a zero `r mod n` and a zero `s` come back as `NoResult`; the caller
/// draws a fresh `k` and tries again.
pub fn schnorr_s<B: MathBackend + ?Sized>(
    b: &B,
    k: &B::Int,
    r: &B::Int,
    d: &B::Int,
    n: &B::Int,
) -> Result<B::Int> {
    let r = b.reduce(r, n)?;
    if b.is_zero(&r) {
        return Err(Error::NoResult {
            operation: "Schnorr r",
        });
    }
    let rd = b.mod_mult(&r, d, n)?;
    let s = b.mod_add(k, &rd, n)?;
    if b.is_zero(&s) {
        return Err(Error::NoResult {
            operation: "Schnorr s",
        });
    }
    Ok(s)
}
