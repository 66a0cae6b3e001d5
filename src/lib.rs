#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Relays `WebAuthn` ceremonies between a remote authentication service and a
//! platform authenticator.
//!
//! The service sends ceremony options with binary fields as base64url text;
//! [`ceremony::transcode`] decodes them, a [`platform::PlatformAuthenticator`]
//! runs the ceremony, and [`relay::WebAuthnRelay`] encodes the credential back
//! into the service's envelope.

/// Version of the webauthn-relay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ceremony;
pub mod codec;
pub mod platform;
pub mod relay;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use codec::DecodeError;
pub use platform::{CancelReason, CeremonyOutcome, CredentialResult, PlatformAuthenticator};
pub use relay::{
    CreateResponse, GetResponse, RelayConfig, RelayError, StartLoginResponse,
    StartRegisterResponse, WebAuthnRelay,
};
pub use settings::RelaySettings;
