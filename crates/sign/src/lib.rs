//! ECC signature schemes for the tpm2crypt library
//!
//! Each scheme module works on backend integers and points:
//!
//! - [`ecdsa`]: FIPS 186-4 ECDSA
//! - [`ec_schnorr`]: the TPM's EC-Schnorr
//! - [`ecdaa`]: commit and sign for anonymous attestation
//! - [`sm2`]: GB/T 32918 signatures
//!
//! [`sign`] and [`verify`] sit on top and take wire-form keys and
//! signatures, selecting the scheme from the signature's [`SigScheme`].
//! ECDAA needs commit state and is only reachable through [`ecdaa`].

#![forbid(unsafe_code)]

pub mod common;
pub mod ec_schnorr;
pub mod ecdaa;
pub mod ecdsa;
pub mod schnorr;
pub mod sm2;

pub use ecdaa::{CancelSignal, CommitState, Commitment, NeverCancel};
pub use schnorr::schnorr_s;

use tpm2crypt_algorithms::drbg::RandomSource;
use tpm2crypt_algorithms::ec::EccCurve;
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::{EccPoint as WirePoint, EccSignature, HashAlg, SigScheme};

use crate::common::{private_scalar, scalar_to_param, validated_point};

/// Sign `digest` with the wire-form private scalar `d`
///
/// `scheme` must be ECDSA, EC-Schnorr or SM2; anything else is a `Scheme`
/// error. The digest must have the size of `hash`.
pub fn sign<B, R>(
    b: &B,
    curve: &EccCurve<B::Int>,
    scheme: SigScheme,
    hash: HashAlg,
    d: &[u8],
    digest: &[u8],
    rng: &mut R,
) -> Result<EccSignature>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    tpm2crypt_algorithms::validate::length("digest", digest.len(), hash.digest_size())?;
    let d = private_scalar(b, curve, d)?;
    let (r, s) = match scheme {
        SigScheme::ECDSA => ecdsa::sign(b, curve, &d, digest, rng)?,
        SigScheme::EC_SCHNORR => ec_schnorr::sign(b, curve, hash, &d, digest, rng)?,
        SigScheme::SM2 => sm2::sign(b, curve, &d, digest, rng)?,
        _ => {
            return Err(Error::Scheme {
                context: "ECC signing",
            })
        }
    };
    Ok(EccSignature {
        scheme,
        hash,
        r: scalar_to_param(b, curve, &r)?,
        s: scalar_to_param(b, curve, &s)?,
    })
}

/// Verify `signature` over `digest` against the wire-form public point `q`
///
/// An off-curve `q` is an `EccPoint` error for ECDSA and EC-Schnorr. SM2
/// requires the caller to have validated `q` already, so there it is fatal.
pub fn verify<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    q: &WirePoint,
    signature: &EccSignature,
    digest: &[u8],
) -> Result<()> {
    let point = match validated_point(b, curve, q) {
        Ok(point) => point,
        Err(Error::PointNotOnCurve) if signature.scheme == SigScheme::SM2 => {
            return Err(Error::fatal(tpm2crypt_api::FailureCode::Parameter))
        }
        Err(e) => return Err(e),
    };
    let r = b.from_be_bytes(signature.r.as_slice());
    let s = b.from_be_bytes(signature.s.as_slice());
    match signature.scheme {
        SigScheme::ECDSA => ecdsa::verify(b, curve, &point, digest, &r, &s),
        SigScheme::EC_SCHNORR => {
            ec_schnorr::verify(b, curve, signature.hash, &point, digest, &r, &s)
        }
        SigScheme::SM2 => sm2::verify(b, curve, &point, digest, &r, &s),
        _ => Err(Error::Scheme {
            context: "ECC verification",
        }),
    }
}
