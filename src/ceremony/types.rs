//! Ceremony option types
//!
//! This module defines the ceremony description as the authentication service
//! issues it (binary fields as base64url text) and the binary view handed to
//! the platform authenticator.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Credential type tag
///
/// `WebAuthn` only defines `public-key`; any other tag is carried verbatim.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum CredentialType {
    #[serde(rename = "public-key")]
    PublicKey,
    #[serde(untagged)]
    Other(String),
}

/// Authenticator attachment preference
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticatorAttachment {
    Platform,
    CrossPlatform,
    #[serde(untagged)]
    Other(String), // e.g. "hybrid"
}

/// User verification requirement
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserVerificationRequirement {
    Required,
    Preferred,
    Discouraged,
    #[serde(untagged)]
    Other(String),
}

/// Public key credential descriptor with a base64url id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CredentialDescriptor {
    #[serde(rename = "type")]
    pub r#type: CredentialType,
    pub id: String, // Base64URL-encoded credential ID
    #[serde(flatten)]
    pub additional: Map<String, Value>, // e.g. "transports"
}

/// Public key credential descriptor with a decoded id
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryCredentialDescriptor {
    pub r#type: CredentialType,
    pub id: Vec<u8>,
    pub additional: Map<String, Value>,
}

/// `WebAuthn` user entity with a base64url id
///
/// Any JSON object in the `user` position is a user entity. The `id` is kept
/// loosely typed so that a missing or non-text id is reported by
/// [`transcode`](super::transcode) against `user.id` rather than turning the
/// object opaque.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>, // Base64URL-encoded user handle
    #[serde(flatten)]
    pub additional: Map<String, Value>, // "name", "displayName", "icon", ...
}

/// `WebAuthn` user entity with a decoded id
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryUserEntity {
    pub id: Vec<u8>,
    pub additional: Map<String, Value>,
}

impl BinaryUserEntity {
    /// Username (e.g., email), when the service sent one as text
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.additional.get("name").and_then(Value::as_str)
    }

    /// Human-readable name, when the service sent one as text
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.additional.get("displayName").and_then(Value::as_str)
    }
}

/// The `user` member as it arrives from the service.
///
/// Objects are user entities; any other JSON value is kept verbatim rather
/// than rejected.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum UserField {
    Entity(UserEntity),
    Opaque(Value),
}

impl<'de> Deserialize<'de> for UserField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields))
                .map(UserField::Entity)
                .map_err(de::Error::custom),
            other => Ok(UserField::Opaque(other)),
        }
    }
}

/// The `user` member after transcoding
#[derive(Clone, Debug, PartialEq)]
pub enum BinaryUserField {
    Entity(BinaryUserEntity),
    Opaque(Value),
}

/// Authenticator selection criteria
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AuthenticatorSelectionCriteria {
    #[serde(
        rename = "authenticatorAttachment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,
    #[serde(
        rename = "requireResidentKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_resident_key: Option<bool>,
    #[serde(
        rename = "userVerification",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub user_verification: Option<UserVerificationRequirement>,
    #[serde(flatten)]
    pub additional: Map<String, Value>, // e.g. "residentKey"
}

/// Public key credential parameters
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PublicKeyCredentialParameters {
    #[serde(rename = "type")]
    pub r#type: CredentialType,
    pub alg: i64, // COSE algorithm identifier (-7 for ES256, -257 for RS256)
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// `WebAuthn` relying party information
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelyingParty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>, // Domain name (e.g., "example.com"); defaults to the caller's origin
    pub name: String, // Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

/// Ceremony options as issued by the authentication service
///
/// Keys the relay does not model are collected in `additional` so that
/// nothing the service sends is lost on the way to the authenticator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CeremonyDescription {
    #[serde(
        rename = "allowCredentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_credentials: Option<Vec<CredentialDescriptor>>,
    #[serde(
        rename = "excludeCredentials",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exclude_credentials: Option<Vec<CredentialDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserField>,
    pub challenge: String, // Base64URL-encoded challenge
    #[serde(
        rename = "authenticatorSelection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    #[serde(
        rename = "pubKeyCredParams",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key_params: Option<Vec<PublicKeyCredentialParameters>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<RelyingParty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>, // Milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        rename = "errorMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_message: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>, // e.g. "rpId", "attestation"
}

impl CeremonyDescription {
    /// Parse ceremony options from the JSON text embedded in a start payload
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or lacks a `challenge`.
    pub fn from_json(options: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(options)
    }

    /// Error reported by the service for a previous step, if any
    ///
    /// A missing `status` or a `status` of `"ok"` means no error.
    #[must_use]
    pub fn service_error(&self) -> Option<&str> {
        match self.status.as_deref() {
            None | Some("ok") => None,
            Some(status) => Some(self.error_message.as_deref().unwrap_or(status)),
        }
    }
}

/// Ceremony options with every binary field decoded
///
/// Only produced by [`transcode`](super::transcode); this is what the
/// platform authenticator consumes.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryCeremonyDescription {
    pub allow_credentials: Option<Vec<BinaryCredentialDescriptor>>,
    pub exclude_credentials: Option<Vec<BinaryCredentialDescriptor>>,
    pub user: Option<BinaryUserField>,
    pub challenge: Vec<u8>,
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,
    pub extensions: Option<Map<String, Value>>,
    pub public_key_params: Option<Vec<PublicKeyCredentialParameters>>,
    pub rp: Option<RelyingParty>,
    pub timeout: Option<u64>,
    pub status: Option<String>,
    pub error_message: Option<String>,
    pub additional: Map<String, Value>,
}
