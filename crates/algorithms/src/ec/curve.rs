//! Named-curve registry

use tpm2crypt_api::CurveId;
use tpm2crypt_params::traditional::ecc::{EccCurveData, CURVES};

use super::EccPoint;
use crate::error::{Error, Result};
use crate::math::MathBackend;

/// Find the constant parameters for `id`
///
/// A linear scan; there are only a handful of curves.
pub fn lookup(id: CurveId) -> Result<&'static EccCurveData> {
    CURVES
        .iter()
        .copied()
        .find(|c| c.curve_id == id.0)
        .ok_or(Error::UnknownCurve(id.0))
}

/// Curve parameters in a backend's integer representation
#[derive(Clone, Debug)]
pub struct EccCurve<I> {
    /// Curve identifier
    pub id: CurveId,
    /// Constant source data
    pub data: &'static EccCurveData,
    /// Field prime
    pub p: I,
    /// Coefficient `a` (mod p)
    pub a: I,
    /// Coefficient `b`
    pub b: I,
    /// Order of the generator
    pub n: I,
    /// Cofactor
    pub h: I,
    /// Generator
    pub g: EccPoint<I>,
    order_bits: usize,
}

impl<I> EccCurve<I> {
    /// Field size in bytes; coordinates are padded to this
    pub fn field_bytes(&self) -> usize {
        self.data.p.len()
    }

    /// Size of the order in bits
    pub fn order_bits(&self) -> usize {
        self.order_bits
    }

    /// Size of the order in bytes; signature scalars are padded to this
    pub fn order_bytes(&self) -> usize {
        (self.order_bits + 7) / 8
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.data.name
    }
}

/// Load curve `id` into backend `b`
pub fn init<B: MathBackend + ?Sized>(b: &B, id: CurveId) -> Result<EccCurve<B::Int>> {
    let data = lookup(id)?;
    let n = b.from_be_bytes(data.n);
    let order_bits = b.bits(&n);
    Ok(EccCurve {
        id,
        data,
        p: b.from_be_bytes(data.p),
        a: b.from_be_bytes(data.a),
        b: b.from_be_bytes(data.b),
        n,
        h: b.from_be_bytes(data.h),
        g: EccPoint::new(
            b.from_be_bytes(data.gx),
            b.from_be_bytes(data.gy),
            b.from_word(1),
        ),
        order_bits,
    })
}
