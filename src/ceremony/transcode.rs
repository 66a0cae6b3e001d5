//! Ceremony option transcoding
//!
//! Turns the service-issued [`CeremonyDescription`] into the
//! [`BinaryCeremonyDescription`] the platform authenticator consumes. Only the
//! challenge, the user id and the credential descriptor ids are touched;
//! everything else is moved across unchanged.

use serde_json::Value;

use crate::codec::{self, DecodeError};

use super::types::{
    BinaryCeremonyDescription, BinaryCredentialDescriptor, BinaryUserEntity, BinaryUserField,
    CeremonyDescription, CredentialDescriptor, UserField,
};

/// Why a binary field could not be decoded
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("is not valid base64url: {0}")]
    Malformed(#[from] DecodeError),
    #[error("is missing or not a string")]
    NotText,
}

/// A binary ceremony field that could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("field `{field}` {source}")]
pub struct TranscodeError {
    /// Path of the offending field, e.g. `allowCredentials[1].id`
    pub field: String,
    #[source]
    pub source: FieldError,
}

fn decode_field(field: impl Into<String>, text: &str) -> Result<Vec<u8>, TranscodeError> {
    codec::decode(text).map_err(|source| TranscodeError {
        field: field.into(),
        source: source.into(),
    })
}

fn transcode_credentials(
    list: &'static str,
    descriptors: Option<Vec<CredentialDescriptor>>,
) -> Result<Option<Vec<BinaryCredentialDescriptor>>, TranscodeError> {
    // Absent stays absent: "no restriction" differs from "empty restriction"
    let Some(descriptors) = descriptors else {
        return Ok(None);
    };

    descriptors
        .into_iter()
        .enumerate()
        .map(|(index, descriptor)| {
            Ok(BinaryCredentialDescriptor {
                id: decode_field(format!("{list}[{index}].id"), &descriptor.id)?,
                r#type: descriptor.r#type,
                additional: descriptor.additional,
            })
        })
        .collect::<Result<Vec<_>, TranscodeError>>()
        .map(Some)
}

fn transcode_user(user: UserField) -> Result<BinaryUserField, TranscodeError> {
    match user {
        UserField::Entity(entity) => {
            let Some(Value::String(id)) = entity.id else {
                return Err(TranscodeError {
                    field: "user.id".to_string(),
                    source: FieldError::NotText,
                });
            };
            Ok(BinaryUserField::Entity(BinaryUserEntity {
                id: decode_field("user.id", &id)?,
                additional: entity.additional,
            }))
        }
        // Not a user object; handed to the authenticator as-is
        UserField::Opaque(value) => Ok(BinaryUserField::Opaque(value)),
    }
}

/// Decode every binary field of a ceremony description
///
/// # Errors
///
/// Returns a `TranscodeError` naming the first field that is not valid
/// base64url, or a user object whose `id` is not text. No partial
/// description is produced.
pub fn transcode(
    description: CeremonyDescription,
) -> Result<BinaryCeremonyDescription, TranscodeError> {
    let challenge = decode_field("challenge", &description.challenge)?;
    let user = description.user.map(transcode_user).transpose()?;
    let allow_credentials =
        transcode_credentials("allowCredentials", description.allow_credentials)?;
    let exclude_credentials =
        transcode_credentials("excludeCredentials", description.exclude_credentials)?;

    Ok(BinaryCeremonyDescription {
        allow_credentials,
        exclude_credentials,
        user,
        challenge,
        authenticator_selection: description.authenticator_selection,
        extensions: description.extensions,
        public_key_params: description.public_key_params,
        rp: description.rp,
        timeout: description.timeout,
        status: description.status,
        error_message: description.error_message,
        additional: description.additional,
    })
}
