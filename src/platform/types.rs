//! Platform authenticator result types

use serde_json::{Map, Value};
use std::fmt;

/// Response payload produced by the authenticator
///
/// Creation ceremonies populate `attestation_object`; assertion ceremonies
/// usually carry `authenticator_data` and, for discoverable credentials, a
/// `user_handle`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthenticatorResponse {
    pub client_data_json: Vec<u8>,
    pub attestation_object: Option<Vec<u8>>,
    pub authenticator_data: Option<Vec<u8>>,
    pub user_handle: Option<Vec<u8>>,
}

impl AuthenticatorResponse {
    /// Bytes reported to the service as `attestation_object`.
    ///
    /// The attestation object wins; authenticator data is the fallback.
    #[must_use]
    pub fn primary_payload(&self) -> Option<&[u8]> {
        self.attestation_object
            .as_deref()
            .or(self.authenticator_data.as_deref())
    }
}

/// Credential returned by a completed ceremony
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CredentialResult {
    /// Credential identifier as reported by the platform
    pub id: String,
    pub raw_id: Vec<u8>,
    pub response: AuthenticatorResponse,
    /// Client extension outputs
    pub extension_results: Map<String, Value>,
}

/// Why a ceremony produced no credential
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// The user dismissed the prompt
    UserCancelled,
    /// The ceremony timeout elapsed
    TimedOut,
    /// The platform refused the request
    NotAllowed,
    /// No authenticator can satisfy the options
    Unsupported,
    Other(String),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::UserCancelled => write!(f, "cancelled by user"),
            CancelReason::TimedOut => write!(f, "timed out"),
            CancelReason::NotAllowed => write!(f, "not allowed"),
            CancelReason::Unsupported => write!(f, "unsupported"),
            CancelReason::Other(msg) => write!(f, "{msg}"),
        }
    }
}

/// Outcome of one platform ceremony
#[derive(Clone, Debug, PartialEq)]
pub enum CeremonyOutcome {
    Completed(CredentialResult),
    Cancelled(CancelReason),
}
