//! Error handling for the arithmetic and primitive layer
//!
//! Recoverable conditions carry a little context for debugging. Fatal
//! conditions carry the [`FailureCode`] and the source location that raised
//! them; both are dropped when the error crosses into [`tpm2crypt_api::Error`].

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use tpm2crypt_api::{Error as CoreError, FailureCode};

/// The error type for primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Signature did not verify
    Signature {
        /// Scheme that rejected the signature
        algorithm: &'static str,
    },

    /// Zero intermediate; retry with a fresh ephemeral value
    NoResult {
        /// Operation that produced the zero value
        operation: &'static str,
    },

    /// Point failed validation against its curve
    PointNotOnCurve,

    /// No registered curve has this identifier
    UnknownCurve(u16),

    /// Scheme not supported here
    Scheme {
        /// Where the scheme was rejected
        context: &'static str,
    },

    /// Key material is inconsistent
    Key {
        /// What was inconsistent
        context: &'static str,
    },

    /// Padding or range check failed while decrypting
    Decryption {
        /// Padding scheme that failed
        scheme: &'static str,
    },

    /// Cancel flag observed between long-running steps
    Canceled,

    /// A seeded DRBG hit its reseed interval
    ReseedRequired,

    /// Fatal condition; puts the instance into failure mode
    Fatal {
        /// Recorded cause
        code: FailureCode,
        /// Where it was raised
        location: &'static Location<'static>,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a fatal error recording the caller's location
    #[track_caller]
    pub fn fatal(code: FailureCode) -> Self {
        Error::Fatal {
            code,
            location: Location::caller(),
        }
    }

    /// True for conditions that must put the instance into failure mode
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Fatal { .. })
    }
}

/// Result type for primitives
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::Signature { algorithm } => write!(f, "{} signature is not valid", algorithm),
            Error::NoResult { operation } => write!(f, "{} produced a zero value", operation),
            Error::PointNotOnCurve => write!(f, "Point is not on the curve"),
            Error::UnknownCurve(id) => write!(f, "Curve 0x{:04x} is not registered", id),
            Error::Scheme { context } => write!(f, "Scheme not supported for {}", context),
            Error::Key { context } => write!(f, "Inconsistent key material: {}", context),
            Error::Decryption { scheme } => write!(f, "{} decryption failed", scheme),
            Error::Canceled => write!(f, "Operation canceled"),
            Error::ReseedRequired => write!(f, "DRBG reseed required"),
            Error::Fatal { code, location } => {
                write!(f, "Fatal {} failure at {}", code, location)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { .. } => CoreError::Value,
            Error::Length { .. } => CoreError::Size,
            Error::Signature { .. } => CoreError::Signature,
            Error::NoResult { .. } => CoreError::NoResult,
            Error::PointNotOnCurve => CoreError::EccPoint,
            Error::UnknownCurve(_) => CoreError::Curve,
            Error::Scheme { .. } => CoreError::Scheme,
            Error::Key { .. } => CoreError::Key,
            Error::Decryption { .. } => CoreError::Value,
            Error::Canceled => CoreError::Canceled,
            Error::ReseedRequired => CoreError::ReseedRequired,
            Error::Fatal { code, .. } => CoreError::Failure { code },
        }
    }
}

pub mod validate;
