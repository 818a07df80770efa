//! ECDAA commit and sign (the arithmetic of `TPM2_Commit` and the ECDAA
//! signing scheme)
//!
//! Commit picks a counter, derives the secret `r` for it from the commit
//! nonce, and returns `E = [r]P1` plus, when a basename point is supplied,
//! `K = [d]M` and `L = [r]M`. Nothing about `r` is stored; the signer
//! regenerates it from the same counter. A 128-bit map records which counters
//! are outstanding so each one can be used for exactly one signature.

use core::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use log::debug;
use tpm2crypt_algorithms::drbg::RandomSource;
use tpm2crypt_algorithms::ec::{arith, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{validate, Error, Result};
use tpm2crypt_algorithms::hash::{digest, digest_parts};
use tpm2crypt_algorithms::kdf::kdfa;
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::HashAlg;
use tpm2crypt_common::SecretBuffer;
use tpm2crypt_params::utils::drbg::{COMMIT_ARRAY_SIZE, COMMIT_INDEX_MASK};

use crate::common::{digest_to_int, MAX_SIGN_ATTEMPTS};
use crate::schnorr::schnorr_s;

const ALGORITHM: &str = "ECDAA";

/// Label for deriving `r` from the commit nonce
const COMMIT_LABEL: &[u8] = b"ECDAA Commit";

/// Hash used to derive `r`
const COMMIT_HASH: HashAlg = HashAlg::Sha256;

/// Externally polled cancel flag
pub trait CancelSignal {
    /// True once the current command should stop
    fn is_canceled(&self) -> bool;
}

impl CancelSignal for AtomicBool {
    fn is_canceled(&self) -> bool {
        self.load(AtomicOrdering::Relaxed)
    }
}

/// A signal that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_canceled(&self) -> bool {
        false
    }
}

fn check_cancel<C: CancelSignal + ?Sized>(cancel: &C) -> Result<()> {
    if cancel.is_canceled() {
        debug!("ECDAA commit canceled");
        return Err(Error::Canceled);
    }
    Ok(())
}

/// Commit nonce, counter and outstanding-commit map
pub struct CommitState {
    nonce: SecretBuffer<32>,
    counter: u64,
    outstanding: [u8; COMMIT_ARRAY_SIZE],
}

impl CommitState {
    /// State with an explicit commit nonce
    pub fn new(nonce: [u8; 32]) -> Self {
        Self {
            nonce: SecretBuffer::new(nonce),
            counter: 0,
            outstanding: [0u8; COMMIT_ARRAY_SIZE],
        }
    }

    /// State with a fresh random commit nonce
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut nonce = [0u8; 32];
        rng.fill(&mut nonce)?;
        let state = Self::new(nonce);
        zeroize::Zeroize::zeroize(&mut nonce);
        Ok(state)
    }

    /// Last counter handed out
    pub fn counter(&self) -> u64 {
        self.counter
    }

    fn slot(counter: u64) -> (usize, u8) {
        let index = (counter & u64::from(COMMIT_INDEX_MASK)) as usize;
        (index / 8, 1u8 << (index % 8))
    }

    /// True when `counter` was committed and not yet used
    pub fn is_outstanding(&self, counter: u64) -> bool {
        if counter == 0 || counter > self.counter {
            return false;
        }
        // older than the map reaches
        if self.counter - counter >= (COMMIT_ARRAY_SIZE * 8) as u64 {
            return false;
        }
        let (byte, mask) = Self::slot(counter);
        self.outstanding[byte] & mask != 0
    }

    fn record(&mut self, counter: u64) {
        self.counter = counter;
        let (byte, mask) = Self::slot(counter);
        self.outstanding[byte] |= mask;
    }

    /// Mark `counter` used; fails when it is not outstanding
    pub fn consume(&mut self, counter: u64) -> Result<()> {
        if !self.is_outstanding(counter) {
            return Err(Error::param("counter", "no outstanding commit"));
        }
        let (byte, mask) = Self::slot(counter);
        self.outstanding[byte] &= !mask;
        Ok(())
    }

    /// The secret `r` belonging to `counter` for the key named `name`
    pub fn regenerate_r<B: MathBackend + ?Sized>(
        &self,
        b: &B,
        curve: &EccCurve<B::Int>,
        counter: u64,
        name: &[u8],
    ) -> Result<B::Int> {
        let bits = curve.order_bits() as u32;
        let raw = kdfa(
            COMMIT_HASH,
            self.nonce.as_slice(),
            COMMIT_LABEL,
            name,
            &counter.to_be_bytes(),
            bits,
        )?;
        let r = b.reduce(&b.from_be_bytes(raw.as_slice()), &curve.n)?;
        if b.is_zero(&r) {
            return Err(Error::NoResult {
                operation: "ECDAA r",
            });
        }
        Ok(r)
    }
}

impl core::fmt::Debug for CommitState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommitState")
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

/// Basename input to a commit: `s2` is hashed to give `x2`, `y2` is used as is
#[derive(Debug, Clone, Copy)]
pub struct Basename<'a> {
    /// Hash applied to `s2`
    pub hash: HashAlg,
    /// Value hashed to the x coordinate
    pub s2: &'a [u8],
    /// y coordinate
    pub y2: &'a [u8],
}

/// Points produced by a commit
#[derive(Debug, Clone, PartialEq)]
pub struct Commitment<I> {
    /// Counter to pass to [`sign`]
    pub counter: u64,
    /// `[d]M`, when a basename was given
    pub k: Option<EccPoint<I>>,
    /// `[r]M`, when a basename was given
    pub l: Option<EccPoint<I>>,
    /// `[r]P1`
    pub e: EccPoint<I>,
}

/// Run the commit computation
///
/// `p1` defaults to the generator. A `p1` or `M` not on the curve is an
/// `EccPoint` error. `cancel` is checked between point multiplications. The
/// counter is only recorded once every point has been computed.
#[allow(clippy::too_many_arguments)]
pub fn commit<B, C>(
    b: &B,
    curve: &EccCurve<B::Int>,
    state: &mut CommitState,
    d: &B::Int,
    name: &[u8],
    p1: Option<&EccPoint<B::Int>>,
    basename: Option<Basename<'_>>,
    cancel: &C,
) -> Result<Commitment<B::Int>>
where
    B: MathBackend + ?Sized,
    C: CancelSignal + ?Sized,
{
    let p1 = p1.unwrap_or(&curve.g);
    if arith::is_infinity(b, p1) || !b.point_is_on_curve(curve, p1)? {
        return Err(Error::PointNotOnCurve);
    }
    let m = match basename {
        Some(base) => {
            let x2 = b.reduce(&b.from_be_bytes(&digest(base.hash, base.s2)), &curve.p)?;
            let m = EccPoint::new(x2, b.from_be_bytes(base.y2), b.from_word(1));
            if !b.point_is_on_curve(curve, &m)? {
                return Err(Error::PointNotOnCurve);
            }
            Some(m)
        }
        None => None,
    };

    let counter = state.counter().wrapping_add(1);
    let r = state.regenerate_r(b, curve, counter, name)?;

    let e = b.point_mul(curve, &r, p1)?;
    let (k, l) = match &m {
        Some(m) => {
            check_cancel(cancel)?;
            let k = b.point_mul(curve, d, m)?;
            check_cancel(cancel)?;
            let l = b.point_mul(curve, &r, m)?;
            (Some(k), Some(l))
        }
        None => (None, None),
    };
    if arith::is_infinity(b, &e)
        || k.as_ref().map_or(false, |p| arith::is_infinity(b, p))
        || l.as_ref().map_or(false, |p| arith::is_infinity(b, p))
    {
        return Err(Error::NoResult {
            operation: "ECDAA commit",
        });
    }

    state.record(counter);
    debug!("ECDAA commit recorded counter {}", counter);
    Ok(Commitment { counter, k, l, e })
}

/// `T = H(nonce || digest) mod n`
fn challenge<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
    nonce: &[u8],
    digest: &[u8],
) -> Result<B::Int> {
    let t = digest_parts(hash, &[nonce, digest]);
    b.reduce(&digest_to_int(b, curve, &t)?, &curve.n)
}

/// Sign `digest` using the commit recorded under `counter`
///
/// Returns the random nonce (the signature's first component) and `s`.
#[allow(clippy::too_many_arguments)]
pub fn sign<B, R>(
    b: &B,
    curve: &EccCurve<B::Int>,
    state: &mut CommitState,
    counter: u64,
    name: &[u8],
    hash: HashAlg,
    d: &B::Int,
    digest: &[u8],
    rng: &mut R,
) -> Result<(Vec<u8>, B::Int)>
where
    B: MathBackend + ?Sized,
    R: RandomSource + ?Sized,
{
    state.consume(counter)?;
    let r = state.regenerate_r(b, curve, counter, name)?;
    let mut nonce = vec![0u8; hash.digest_size()];
    for _ in 0..MAX_SIGN_ATTEMPTS {
        rng.fill(&mut nonce)?;
        let t = challenge(b, curve, hash, &nonce, digest)?;
        match schnorr_s(b, &r, &t, d, &curve.n) {
            Ok(s) => return Ok((nonce, s)),
            Err(Error::NoResult { .. }) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(Error::NoResult {
        operation: "ECDAA signing",
    })
}

/// Check `[s]P1 == E + [T]Q`
///
/// `q` is the signer's key relative to `p1` (`Q = [d]P1`) and `e` is the
/// commitment the signature was made against.
#[allow(clippy::too_many_arguments)]
pub fn verify<B: MathBackend + ?Sized>(
    b: &B,
    curve: &EccCurve<B::Int>,
    hash: HashAlg,
    p1: &EccPoint<B::Int>,
    e: &EccPoint<B::Int>,
    q: &EccPoint<B::Int>,
    nonce: &[u8],
    digest: &[u8],
    s: &B::Int,
) -> Result<()> {
    if b.is_zero(s) || b.compare(s, &curve.n).is_ge() {
        return Err(Error::Signature {
            algorithm: ALGORITHM,
        });
    }
    let t = challenge(b, curve, hash, nonce, digest)?;
    let lhs = b.point_mul(curve, s, p1)?;
    let tq = b.point_mul(curve, &t, q)?;
    let rhs = b.point_add(curve, e, &tq)?;
    validate::signature(lhs == rhs, ALGORITHM)
}
