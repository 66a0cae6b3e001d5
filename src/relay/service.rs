//! Ceremony relay service
//!
//! This module provides the relay that drives registration and login
//! ceremonies: decode the service's options, run the platform ceremony once,
//! and encode the resulting credential into the service's envelope.

use log::{debug, info, warn};

use super::config::RelayConfig;
use super::envelope::{
    AuthenticatorResponseData, CreateResponse, GetResponse, StartLoginResponse,
    StartRegisterResponse,
};
use super::errors::{CeremonyKind, RelayError};
use crate::ceremony::{transcode, BinaryCeremonyDescription, CeremonyDescription};
use crate::platform::{CeremonyOutcome, CredentialResult, PlatformAuthenticator};

/// Ceremony relay between the authentication service and a platform
/// authenticator
///
/// The relay holds no mutable state; share it behind an `Arc` to serve
/// concurrent ceremonies.
pub struct WebAuthnRelay<A> {
    config: RelayConfig,
    authenticator: A,
}

impl<A: PlatformAuthenticator> WebAuthnRelay<A> {
    /// Create a new relay over the given authenticator
    #[must_use]
    pub fn new(config: RelayConfig, authenticator: A) -> Self {
        Self {
            config,
            authenticator,
        }
    }

    /// The configuration this relay was built with
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Decode the options embedded in a start payload
    fn prepare(options: &str) -> Result<BinaryCeremonyDescription, RelayError> {
        let description = CeremonyDescription::from_json(options)?;
        if let Some(message) = description.service_error() {
            debug!("Ceremony options carry a service status: {message}");
        }
        Ok(transcode(description)?)
    }

    /// Encode a completed ceremony, or report the cancellation
    fn complete(
        kind: CeremonyKind,
        outcome: CeremonyOutcome,
    ) -> Result<AuthenticatorResponseData, RelayError> {
        let credential: CredentialResult = match outcome {
            CeremonyOutcome::Completed(credential) => credential,
            CeremonyOutcome::Cancelled(reason) => {
                warn!("Platform {kind} ceremony produced no credential: {reason}");
                return Err(RelayError::Ceremony { kind, reason });
            }
        };

        AuthenticatorResponseData::from_credential(credential).ok_or_else(|| {
            warn!("Platform {kind} ceremony returned a credential without a response payload");
            RelayError::IncompleteCredential(kind)
        })
    }

    /// Run a registration ceremony
    ///
    /// # Arguments
    /// * `start` - Registration start payload from the authentication service
    ///
    /// # Returns
    /// The registration envelope to send back to the service
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The embedded options are not valid JSON or lack a challenge
    /// - A binary option field is not valid base64url (the platform is not called)
    /// - The platform ceremony is cancelled, times out or is refused
    /// - The returned credential has no response payload
    pub async fn create_credential(
        &self,
        start: StartRegisterResponse,
    ) -> Result<CreateResponse, RelayError> {
        debug!(
            "Starting registration ceremony for registration_id={}",
            start.registration_id
        );
        let options = Self::prepare(&start.fido2_json_options)?;

        let outcome = self.authenticator.create_credential(options).await;
        let authenticator_response_data = Self::complete(CeremonyKind::Registration, outcome)?;

        info!(
            "Registration ceremony completed for registration_id={}",
            start.registration_id
        );
        Ok(CreateResponse {
            authenticator_response_data,
            registration_id: start.registration_id,
            aa_sig: start.aa_sig,
            webauthn_client_id: self.config.webauthn_client_id.clone(),
        })
    }

    /// Run a login ceremony
    ///
    /// # Arguments
    /// * `start` - Login start payload from the authentication service
    ///
    /// # Returns
    /// The login envelope to send back to the service
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The embedded options are not valid JSON or lack a challenge
    /// - A binary option field is not valid base64url (the platform is not called)
    /// - The platform ceremony is cancelled, times out or is refused
    /// - The returned credential has no response payload
    pub async fn get_credential(
        &self,
        start: StartLoginResponse,
    ) -> Result<GetResponse, RelayError> {
        debug!(
            "Starting login ceremony for auth_request_id={}",
            start.auth_request_id
        );
        let options = Self::prepare(&start.fido2_json_options)?;

        let outcome = self.authenticator.get_assertion(options).await;
        let authenticator_response_data = Self::complete(CeremonyKind::Login, outcome)?;

        info!(
            "Login ceremony completed for auth_request_id={}",
            start.auth_request_id
        );
        Ok(GetResponse {
            authenticator_response_data,
            auth_request_id: start.auth_request_id,
            aa_guid: start.aa_guid,
            webauthn_client_id: self.config.webauthn_client_id.clone(),
        })
    }
}
