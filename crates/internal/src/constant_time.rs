//! Constant-time operations to prevent timing attacks

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Returns true if the slices are equal, false otherwise. Slices of
/// different lengths compare unequal immediately; the length is not secret.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

/// Returns `a` if `condition` is false, `b` if it is true, without branching
/// on `condition`
#[inline]
pub fn ct_select_u64(a: u64, b: u64, condition: bool) -> u64 {
    u64::conditional_select(&a, &b, Choice::from(condition as u8))
}
