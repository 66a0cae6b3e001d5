//! Ceremony relay
//!
//! This module ties the codec, the option transcoder and the platform
//! boundary together into the two service-facing flows.

mod config;
mod envelope;
mod errors;
mod service;

// Re-exports for public use
pub use config::RelayConfig;
pub use envelope::{
    AuthenticatorResponseData, CreateResponse, GetResponse, StartLoginResponse,
    StartRegisterResponse,
};
pub use errors::{CeremonyKind, RelayError};
pub use service::WebAuthnRelay;
