//! Service-facing payloads
//!
//! The start payloads arrive from the authentication service; the response
//! envelopes go back to it. Field names are the service's wire names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::platform::CredentialResult;

/// Registration start payload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StartRegisterResponse {
    pub fido2_json_options: String, // JSON text of the ceremony options
    pub registration_id: String,
    pub aa_sig: String,
}

/// Login start payload
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StartLoginResponse {
    pub fido2_json_options: String, // JSON text of the ceremony options
    pub auth_request_id: String,
    pub aa_guid: String,
}

impl StartRegisterResponse {
    /// Parse a registration start payload
    ///
    /// # Errors
    /// Returns an error if the payload is not JSON or misses a field
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

impl StartLoginResponse {
    /// Parse a login start payload
    ///
    /// # Errors
    /// Returns an error if the payload is not JSON or misses a field
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Credential fields re-encoded as base64url
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuthenticatorResponseData {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    pub attestation_object: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_data: Option<String>,
    pub client_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
    pub extensions: Map<String, Value>,
}

impl AuthenticatorResponseData {
    /// Encode a platform credential for the service.
    ///
    /// Returns `None` when the credential carries neither an attestation
    /// object nor authenticator data. No envelope with an empty
    /// `attestation_object` is ever produced; the relay reports such a
    /// credential as [`RelayError::IncompleteCredential`](super::RelayError::IncompleteCredential).
    #[must_use]
    pub fn from_credential(credential: CredentialResult) -> Option<Self> {
        let response = credential.response;
        let attestation_object = codec::encode(response.primary_payload()?);

        Some(Self {
            id: credential.id,
            raw_id: codec::encode(&credential.raw_id),
            attestation_object,
            authenticator_data: response.authenticator_data.as_deref().map(codec::encode),
            client_data: codec::encode(&response.client_data_json),
            user_handle: response.user_handle.as_deref().map(codec::encode),
            extensions: credential.extension_results,
        })
    }
}

/// Registration result envelope
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateResponse {
    pub authenticator_response_data: AuthenticatorResponseData,
    pub registration_id: String,
    pub aa_sig: String,
    pub webauthn_client_id: String,
}

/// Login result envelope
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GetResponse {
    pub authenticator_response_data: AuthenticatorResponseData,
    pub auth_request_id: String,
    pub aa_guid: String,
    pub webauthn_client_id: String,
}

impl CreateResponse {
    /// Serialize the envelope for the service
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl GetResponse {
    /// Serialize the envelope for the service
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
