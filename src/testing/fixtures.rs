//! Test fixtures providing pre-built ceremony data
//!
//! Options JSON, start payloads and platform credentials shared by unit and
//! integration tests.

use serde_json::{json, Map, Value};

use crate::platform::{AuthenticatorResponse, CredentialResult};
use crate::relay::{RelayConfig, StartLoginResponse, StartRegisterResponse};

use super::constants::{
    TEST_AA_GUID, TEST_AA_SIG, TEST_AUTH_REQUEST_ID, TEST_CLIENT_ID, TEST_REGISTRATION_ID,
    TEST_RP_ID,
};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// Registration options as the service issues them
    #[must_use]
    pub fn registration_options() -> Value {
        json!({
            "challenge": "AAE",
            "user": {"id": "AAI", "name": "a", "displayName": "A"},
            "rp": {"id": TEST_RP_ID, "name": "Example"},
            "pubKeyCredParams": [
                {"type": "public-key", "alg": -7},
                {"type": "public-key", "alg": -257}
            ],
            "authenticatorSelection": {
                "authenticatorAttachment": "platform",
                "requireResidentKey": false,
                "userVerification": "preferred"
            },
            "excludeCredentials": [{"type": "public-key", "id": "BQY"}],
            "extensions": {"credProps": true},
            "timeout": 60000,
            "status": "ok",
            "errorMessage": ""
        })
    }

    /// Login options as the service issues them
    #[must_use]
    pub fn login_options() -> Value {
        json!({
            "challenge": "CQoL",
            "rpId": TEST_RP_ID,
            "allowCredentials": [
                {"type": "public-key", "id": "AQ"},
                {"type": "public-key", "id": "AgM", "transports": ["internal", "hybrid"]}
            ],
            "userVerification": "required",
            "extensions": {},
            "timeout": 30000
        })
    }

    /// Registration start payload wrapping [`registration_options`](Self::registration_options)
    #[must_use]
    pub fn start_register_response() -> StartRegisterResponse {
        Self::start_register_response_with(&Self::registration_options())
    }

    /// Registration start payload wrapping arbitrary options
    #[must_use]
    pub fn start_register_response_with(options: &Value) -> StartRegisterResponse {
        StartRegisterResponse {
            fido2_json_options: options.to_string(),
            registration_id: TEST_REGISTRATION_ID.to_string(),
            aa_sig: TEST_AA_SIG.to_string(),
        }
    }

    /// Login start payload wrapping [`login_options`](Self::login_options)
    #[must_use]
    pub fn start_login_response() -> StartLoginResponse {
        Self::start_login_response_with(&Self::login_options())
    }

    /// Login start payload wrapping arbitrary options
    #[must_use]
    pub fn start_login_response_with(options: &Value) -> StartLoginResponse {
        StartLoginResponse {
            fido2_json_options: options.to_string(),
            auth_request_id: TEST_AUTH_REQUEST_ID.to_string(),
            aa_guid: TEST_AA_GUID.to_string(),
        }
    }

    /// Credential from a creation ceremony: attestation object, no
    /// authenticator data, no user handle
    #[must_use]
    pub fn attestation_credential() -> CredentialResult {
        CredentialResult {
            id: "AQID".to_string(),
            raw_id: vec![1, 2, 3],
            response: AuthenticatorResponse {
                client_data_json: vec![6],
                attestation_object: Some(vec![4, 5]),
                authenticator_data: None,
                user_handle: None,
            },
            extension_results: Map::new(),
        }
    }

    /// Credential from an assertion ceremony: authenticator data and a user
    /// handle, no attestation object
    #[must_use]
    pub fn assertion_credential() -> CredentialResult {
        let mut extension_results = Map::new();
        extension_results.insert("appid".to_string(), Value::Bool(false));

        CredentialResult {
            id: "AgM".to_string(),
            raw_id: vec![2, 3],
            response: AuthenticatorResponse {
                client_data_json: br#"{"type":"webauthn.get"}"#.to_vec(),
                attestation_object: None,
                authenticator_data: Some(vec![0x49; 37]),
                user_handle: Some(vec![0, 2]),
            },
            extension_results,
        }
    }

    /// Relay configuration with the test client id
    #[must_use]
    pub fn relay_config() -> RelayConfig {
        RelayConfig::new(TEST_CLIENT_ID)
    }
}
