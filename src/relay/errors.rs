//! Relay error types
//!
//! This module defines the errors a ceremony relay can report to its caller.

use std::fmt;

use crate::ceremony::TranscodeError;
use crate::platform::CancelReason;

/// Which ceremony failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CeremonyKind {
    Registration,
    Login,
}

impl fmt::Display for CeremonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CeremonyKind::Registration => write!(f, "registration"),
            CeremonyKind::Login => write!(f, "login"),
        }
    }
}

/// Errors that can occur while relaying a ceremony
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The embedded ceremony options are not valid JSON or miss required keys
    #[error("invalid ceremony options: {0}")]
    Options(#[from] serde_json::Error),

    /// A binary field of the ceremony options could not be decoded
    #[error(transparent)]
    Decode(#[from] TranscodeError),

    /// The platform produced no credential
    #[error("{kind} failed")]
    Ceremony {
        kind: CeremonyKind,
        reason: CancelReason,
    },

    /// The platform returned a credential without any response payload
    #[error("{0} failed: credential has neither attestation object nor authenticator data")]
    IncompleteCredential(CeremonyKind),
}

impl RelayError {
    /// Whether the error came from the user-interactive step
    #[must_use]
    pub fn is_ceremony_failure(&self) -> bool {
        matches!(self, RelayError::Ceremony { .. })
    }
}
