//! Relay configuration

use serde::{Deserialize, Serialize};

/// Per-relay configuration, fixed at construction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Client identifier echoed in every response envelope
    #[serde(default)]
    pub webauthn_client_id: String,
}

impl RelayConfig {
    #[must_use]
    pub fn new(webauthn_client_id: impl Into<String>) -> Self {
        Self {
            webauthn_client_id: webauthn_client_id.into(),
        }
    }
}
