//! Elliptic curve registry and point arithmetic
//!
//! Curves are short Weierstrass curves over prime fields, loaded from the
//! byte tables in `tpm2crypt-params` into whichever integer type the active
//! [`MathBackend`](crate::math::MathBackend) uses. Points are kept in
//! Jacobian coordinates `(X, Y, Z)` with `z == 1` meaning affine and
//! `z == 0` marking the point at infinity.

pub mod arith;
pub mod curve;
pub mod keygen;

pub use curve::{lookup, EccCurve};
pub use keygen::{generate_key_pair, random_scalar};

/// Point in Jacobian coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct EccPoint<I> {
    /// X coordinate
    pub x: I,
    /// Y coordinate
    pub y: I,
    /// Z coordinate; zero for the point at infinity
    pub z: I,
}

impl<I> EccPoint<I> {
    /// Point from raw coordinates
    pub fn new(x: I, y: I, z: I) -> Self {
        Self { x, y, z }
    }
}
