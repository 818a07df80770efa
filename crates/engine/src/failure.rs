//! The failure-mode latch

use core::panic::Location;

use log::error;
use tpm2crypt_api::FailureCode;

/// Records the first fatal condition until the next reset
///
/// The location is kept for diagnostics only and never leaves the engine
/// in a response.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureMode {
    entered: Option<(FailureCode, &'static Location<'static>)>,
}

impl FailureMode {
    /// Recorded code, if the instance is in failure mode
    pub fn code(&self) -> Option<FailureCode> {
        self.entered.map(|(code, _)| code)
    }

    /// Where the recorded failure was raised
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.entered.map(|(_, location)| location)
    }

    /// True once a fatal condition has been latched
    pub fn is_active(&self) -> bool {
        self.entered.is_some()
    }

    /// Latch `code`; a later fatal does not replace the first one
    pub(crate) fn enter(&mut self, code: FailureCode, location: &'static Location<'static>) {
        if self.entered.is_none() {
            error!("entering failure mode: {} at {}", code, location);
            self.entered = Some((code, location));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entered = None;
    }
}
