//! ECC key exchange for the tpm2crypt library
//!
//! - [`zgen`]: one-pass ECDH, `Z = [h·d]Q`
//! - [`ecdh`]: full unified model, two shared points
//! - [`ecmqv`]: MQV with one shared point
//! - [`sm2`]: the SM2 exchange with one shared point
//!
//! [`ecdh_zgen`] and [`two_phase`] take wire-form keys and points; the
//! scheme modules work on backend integers.

#![forbid(unsafe_code)]

pub mod common;
pub mod ecdh;
pub mod ecmqv;
pub mod sm2;
pub mod zgen;

use log::debug;
use tpm2crypt_algorithms::ec::EccCurve;
use tpm2crypt_algorithms::error::{Error, Result};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::{EccPoint as WirePoint, FailureCode, KeyExchangeScheme};

use crate::common::{peer_point, private_scalar};

/// Shared points from a two-phase exchange
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPhaseOutput {
    /// First shared point
    pub z1: WirePoint,
    /// Second shared point; only the full unified model produces one
    pub z2: Option<WirePoint>,
}

/// One-pass ECDH with the wire-form private scalar `d` and peer point `q`
///
/// An off-curve `q` is an `EccPoint` error.
pub fn ecdh_zgen<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    d: &[u8],
    q: &WirePoint,
) -> Result<WirePoint> {
    let q = peer_point(b, curve, q)?;
    let d = private_scalar(b, curve, d)?;
    let z = zgen::zgen(b, curve, &d, &q)?;
    b.point_to_wire(curve, &z)
}

/// Second phase of a two-phase exchange, from party A's side
///
/// `ds_a`/`de_a` are our static and ephemeral private scalars, `qs_b`/`qe_b`
/// the peer's static and ephemeral public points. An unknown `scheme` is a
/// `Scheme` error. Off-curve peer points are an `EccPoint` error, except for
/// SM2 where the caller has to have validated them and they are fatal.
pub fn two_phase<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    scheme: KeyExchangeScheme,
    ds_a: &[u8],
    de_a: &[u8],
    qs_b: &WirePoint,
    qe_b: &WirePoint,
) -> Result<TwoPhaseOutput> {
    debug!("two-phase key exchange {:#06x} on {}", scheme.0, curve.name());
    let point = |q: &WirePoint| match peer_point(b, curve, q) {
        Err(Error::PointNotOnCurve) if scheme == KeyExchangeScheme::SM2 => {
            Err(Error::fatal(FailureCode::Parameter))
        }
        other => other,
    };
    let qs_b = point(qs_b)?;
    let qe_b = point(qe_b)?;
    let ds_a = private_scalar(b, curve, ds_a)?;
    let de_a = private_scalar(b, curve, de_a)?;

    match scheme {
        KeyExchangeScheme::ECDH => {
            let (z1, z2) = ecdh::full_unified(b, curve, &ds_a, &de_a, &qs_b, &qe_b)?;
            Ok(TwoPhaseOutput {
                z1: b.point_to_wire(curve, &z1)?,
                z2: Some(b.point_to_wire(curve, &z2)?),
            })
        }
        KeyExchangeScheme::ECMQV => {
            let z = ecmqv::ecmqv(b, curve, &ds_a, &de_a, &qs_b, &qe_b)?;
            Ok(TwoPhaseOutput {
                z1: b.point_to_wire(curve, &z)?,
                z2: None,
            })
        }
        KeyExchangeScheme::SM2 => {
            let z = sm2::key_exchange(b, curve, &ds_a, &de_a, &qs_b, &qe_b)?;
            Ok(TwoPhaseOutput {
                z1: b.point_to_wire(curve, &z)?,
                z2: None,
            })
        }
        _ => Err(Error::Scheme {
            context: "two-phase key exchange",
        }),
    }
}
