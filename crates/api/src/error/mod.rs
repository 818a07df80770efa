//! Outcome kinds returned across the crate boundary
//!
//! Two propagation classes exist. Recoverable outcomes describe something the
//! caller can act on (reject, retry, pick another scheme). A [`Error::Failure`]
//! means the instance has entered failure mode: it carries only the recorded
//! cause and deliberately nothing else.

use core::fmt;

/// Recorded cause of a fatal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCode {
    /// A result did not fit the storage it was given
    Allocation,
    /// Division or reduction by zero
    DivideByZero,
    /// An internal caller broke a precondition
    Parameter,
    /// A power-on or on-demand self test failed
    SelfTest,
    /// The entropy source failed its continuous test or stopped responding
    Entropy,
    /// The math library produced an unusable result
    MathLibrary,
    /// Any other internal inconsistency
    Internal,
}

impl FailureCode {
    /// Short stable name, suitable for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::Allocation => "allocation",
            FailureCode::DivideByZero => "divide-by-zero",
            FailureCode::Parameter => "parameter",
            FailureCode::SelfTest => "self-test",
            FailureCode::Entropy => "entropy",
            FailureCode::MathLibrary => "math-library",
            FailureCode::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary error type for the crypto core
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Signature did not verify
    #[error("signature is not valid")]
    Signature,

    /// Scheme is not supported for this key or operation
    #[error("scheme is not supported")]
    Scheme,

    /// A zero intermediate was produced; retry with a fresh ephemeral value
    #[error("computation produced no usable result")]
    NoResult,

    /// Point is not on the selected curve
    #[error("point is not on the curve")]
    EccPoint,

    /// Curve identifier is not registered
    #[error("curve is not supported")]
    Curve,

    /// Value out of range, or padding did not check out
    #[error("value is out of range")]
    Value,

    /// Buffer or length mismatch
    #[error("size is not valid")]
    Size,

    /// Key material is inconsistent
    #[error("key is not valid")]
    Key,

    /// The cancel flag was observed
    #[error("operation was canceled")]
    Canceled,

    /// A seeded DRBG reached its reseed interval
    #[error("generator must be reseeded")]
    ReseedRequired,

    /// The instance is in failure mode
    #[error("failure mode ({code})")]
    Failure {
        /// Recorded cause
        code: FailureCode,
    },
}

impl Error {
    /// Shorthand for a fatal outcome
    pub fn failure(code: FailureCode) -> Self {
        Error::Failure { code }
    }

    /// True when this outcome puts the instance in failure mode
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Failure { .. })
    }

    /// The recorded cause, for fatal outcomes
    pub fn failure_code(&self) -> Option<FailureCode> {
        match self {
            Error::Failure { code } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for the crypto core
pub type Result<T> = core::result::Result<T, Error>;
