// End-to-end ceremony flows through the public API with a mock authenticator
use serde_json::{json, Value};
use std::sync::Arc;
use webauthn_relay::ceremony::BinaryUserField;
use webauthn_relay::codec;
use webauthn_relay::platform::CancelReason;
use webauthn_relay::relay::{RelayConfig, RelayError, WebAuthnRelay};
use webauthn_relay::testing::constants::{TEST_CLIENT_ID, TEST_RP_ID};
use webauthn_relay::testing::{MockAuthenticator, RecordedCall, TestFixtures};

#[tokio::test]
async fn test_registration_scenario() {
    let authenticator = MockAuthenticator::completing(TestFixtures::attestation_credential());
    let relay = WebAuthnRelay::new(TestFixtures::relay_config(), authenticator);

    let response = relay
        .create_credential(TestFixtures::start_register_response())
        .await
        .expect("registration should succeed");

    let data = &response.authenticator_response_data;
    assert_eq!(data.id, "AQID");
    assert_eq!(data.raw_id, codec::encode(&[1, 2, 3]));
    assert_eq!(data.attestation_object, codec::encode(&[4, 5]));
    assert_eq!(data.client_data, codec::encode(&[6]));
    assert!(data.authenticator_data.is_none());
    assert!(data.user_handle.is_none());
    assert_eq!(response.registration_id, "R1");
    assert_eq!(response.aa_sig, "S1");
    assert_eq!(response.webauthn_client_id, TEST_CLIENT_ID);
}

#[tokio::test]
async fn test_registration_options_reach_platform_decoded() {
    let authenticator = Arc::new(MockAuthenticator::completing(
        TestFixtures::attestation_credential(),
    ));
    let relay = WebAuthnRelay::new(RelayConfig::default(), Arc::clone(&authenticator));

    relay
        .create_credential(TestFixtures::start_register_response())
        .await
        .expect("registration should succeed");

    let calls = authenticator.calls();
    assert_eq!(calls.len(), 1);
    let RecordedCall::Create(options) = &calls[0] else {
        panic!("expected a creation ceremony, got {:?}", calls[0]);
    };

    assert_eq!(options.challenge, vec![0, 1]);
    let Some(BinaryUserField::Entity(user)) = &options.user else {
        panic!("expected a user entity, got {:?}", options.user);
    };
    assert_eq!(user.id, vec![0, 2]);
    assert_eq!(user.name(), Some("a"));
    assert_eq!(user.display_name(), Some("A"));
    assert!(options.allow_credentials.is_none());
    assert_eq!(options.exclude_credentials.as_ref().unwrap()[0].id, vec![5, 6]);
    assert_eq!(options.rp.as_ref().unwrap().id.as_deref(), Some(TEST_RP_ID));
    assert_eq!(options.public_key_params.as_ref().unwrap().len(), 2);
    assert_eq!(options.extensions.as_ref().unwrap()["credProps"], json!(true));
    assert_eq!(options.timeout, Some(60000));
}

#[tokio::test]
async fn test_login_scenario() {
    let authenticator = Arc::new(MockAuthenticator::completing(
        TestFixtures::assertion_credential(),
    ));
    let relay = WebAuthnRelay::new(TestFixtures::relay_config(), Arc::clone(&authenticator));

    let response = relay
        .get_credential(TestFixtures::start_login_response())
        .await
        .expect("login should succeed");

    let data = &response.authenticator_response_data;
    let authenticator_data = codec::encode(&[0x49; 37]);
    // no attestation object: authenticator data stands in
    assert_eq!(data.attestation_object, authenticator_data);
    assert_eq!(data.authenticator_data.as_deref(), Some(authenticator_data.as_str()));
    assert_eq!(data.user_handle.as_deref(), Some("AAI"));
    assert_eq!(data.extensions["appid"], json!(false));
    assert_eq!(response.auth_request_id, "A1");
    assert_eq!(response.aa_guid, "G1");

    let calls = authenticator.calls();
    let RecordedCall::Get(options) = &calls[0] else {
        panic!("expected an assertion ceremony, got {:?}", calls[0]);
    };
    assert_eq!(options.challenge, vec![9, 10, 11]);
    let allow = options.allow_credentials.as_ref().unwrap();
    assert_eq!(allow.len(), 2);
    assert_eq!(allow[0].id, vec![1]);
    assert_eq!(allow[1].id, vec![2, 3]);
    assert_eq!(allow[1].additional["transports"], json!(["internal", "hybrid"]));
    assert_eq!(options.additional["rpId"], json!(TEST_RP_ID));
    assert_eq!(options.additional["userVerification"], json!("required"));
}

#[tokio::test]
async fn test_login_envelope_wire_format() {
    let relay = WebAuthnRelay::new(
        TestFixtures::relay_config(),
        MockAuthenticator::completing(TestFixtures::assertion_credential()),
    );

    let response = relay
        .get_credential(TestFixtures::start_login_response())
        .await
        .unwrap();
    let wire: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

    let data = wire["authenticator_response_data"].as_object().unwrap();
    for key in [
        "id",
        "rawId",
        "attestation_object",
        "authenticator_data",
        "client_data",
        "user_handle",
        "extensions",
    ] {
        assert!(data.contains_key(key), "missing {key}");
    }
    assert_eq!(wire["auth_request_id"], json!("A1"));
    assert_eq!(wire["aa_guid"], json!("G1"));
    assert_eq!(wire["webauthn_client_id"], json!(TEST_CLIENT_ID));
}

#[tokio::test]
async fn test_registration_envelope_omits_absent_fields() {
    let relay = WebAuthnRelay::new(
        RelayConfig::default(),
        MockAuthenticator::completing(TestFixtures::attestation_credential()),
    );

    let response = relay
        .create_credential(TestFixtures::start_register_response())
        .await
        .unwrap();
    let wire: Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();

    let data = wire["authenticator_response_data"].as_object().unwrap();
    assert!(!data.contains_key("authenticator_data"));
    assert!(!data.contains_key("user_handle"));
    assert_eq!(wire["webauthn_client_id"], json!(""));
}

#[tokio::test]
async fn test_cancelled_registration() {
    let authenticator = Arc::new(MockAuthenticator::cancelling(CancelReason::UserCancelled));
    let relay = WebAuthnRelay::new(RelayConfig::default(), Arc::clone(&authenticator));

    let err = relay
        .create_credential(TestFixtures::start_register_response())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "registration failed");
    assert!(err.is_ceremony_failure());
    assert_eq!(authenticator.calls().len(), 1);
}

#[tokio::test]
async fn test_cancelled_login() {
    let relay = WebAuthnRelay::new(
        RelayConfig::default(),
        MockAuthenticator::cancelling(CancelReason::NotAllowed),
    );

    let err = relay
        .get_credential(TestFixtures::start_login_response())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "login failed");
}

#[tokio::test]
async fn test_malformed_credential_id_aborts_before_platform() {
    let authenticator = Arc::new(MockAuthenticator::completing(
        TestFixtures::assertion_credential(),
    ));
    let relay = WebAuthnRelay::new(RelayConfig::default(), Arc::clone(&authenticator));

    let mut options = TestFixtures::login_options();
    options["allowCredentials"][1]["id"] = json!("A");

    let err = relay
        .get_credential(TestFixtures::start_login_response_with(&options))
        .await
        .unwrap_err();

    match err {
        RelayError::Decode(e) => assert_eq!(e.field, "allowCredentials[1].id"),
        other => panic!("expected a decode error, got {other:?}"),
    }
    assert!(authenticator.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_id_in_sparse_user_aborts_before_platform() {
    let authenticator = Arc::new(MockAuthenticator::completing(
        TestFixtures::attestation_credential(),
    ));
    let relay = WebAuthnRelay::new(RelayConfig::default(), Arc::clone(&authenticator));

    let mut options = TestFixtures::registration_options();
    options["user"] = json!({"id": "!!bad", "name": "a"});

    let err = relay
        .create_credential(TestFixtures::start_register_response_with(&options))
        .await
        .unwrap_err();

    match err {
        RelayError::Decode(e) => assert_eq!(e.field, "user.id"),
        other => panic!("expected a decode error, got {other:?}"),
    }
    assert!(authenticator.calls().is_empty());
}

#[tokio::test]
async fn test_each_call_is_one_ceremony() {
    let authenticator = Arc::new(MockAuthenticator::completing(
        TestFixtures::attestation_credential(),
    ));
    let relay = Arc::new(WebAuthnRelay::new(
        RelayConfig::default(),
        Arc::clone(&authenticator),
    ));

    let first = {
        let relay = Arc::clone(&relay);
        tokio::spawn(async move {
            relay
                .create_credential(TestFixtures::start_register_response())
                .await
        })
    };
    let second = {
        let relay = Arc::clone(&relay);
        tokio::spawn(async move {
            relay
                .create_credential(TestFixtures::start_register_response())
                .await
        })
    };

    assert!(first.await.unwrap().is_ok());
    assert!(second.await.unwrap().is_ok());
    assert_eq!(authenticator.calls().len(), 2);
}

#[test]
fn test_start_payload_from_service_json() {
    let payload = json!({
        "fido2_json_options": TestFixtures::registration_options().to_string(),
        "registration_id": "R9",
        "aa_sig": "S9"
    })
    .to_string();

    let start = webauthn_relay::StartRegisterResponse::from_json(&payload).unwrap();
    assert_eq!(start.registration_id, "R9");
    assert_eq!(start.aa_sig, "S9");
}
