//! Testing utilities for webauthn-relay
//!
//! Available with the `testing` feature (and in unit tests).
//!
//! - [`fixtures`] - Pre-built ceremony options, start payloads and credentials
//! - [`mock`] - A scripted [`PlatformAuthenticator`](crate::platform::PlatformAuthenticator)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webauthn_relay::relay::{RelayConfig, WebAuthnRelay};
//! use webauthn_relay::testing::{MockAuthenticator, TestFixtures};
//!
//! async fn registration_round_trip() {
//!     let authenticator = MockAuthenticator::completing(TestFixtures::attestation_credential());
//!     let relay = WebAuthnRelay::new(RelayConfig::default(), authenticator);
//!     let response = relay
//!         .create_credential(TestFixtures::start_register_response())
//!         .await
//!         .unwrap();
//!     assert_eq!(response.registration_id, "R1");
//! }
//! ```

pub mod fixtures;
pub mod mock;

pub use fixtures::TestFixtures;
pub use mock::{MockAuthenticator, RecordedCall};

/// Common test constants
pub mod constants {
    /// Registration id issued by the test service
    pub const TEST_REGISTRATION_ID: &str = "R1";

    /// Registration signature issued by the test service
    pub const TEST_AA_SIG: &str = "S1";

    /// Login request id issued by the test service
    pub const TEST_AUTH_REQUEST_ID: &str = "A1";

    /// Login GUID issued by the test service
    pub const TEST_AA_GUID: &str = "G1";

    /// Relying party id
    pub const TEST_RP_ID: &str = "example.com";

    /// Client id configured on test relays
    pub const TEST_CLIENT_ID: &str = "test-client";
}
