use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use passkey_enroll::{
    AssertionResponse, CoordinationError, LoginRequest, PasskeyFlow, SetCredentialRequest,
};

use crate::common::{SoftAuthenticator, init_test_environment};
use crate::common::webauthn_helpers::{authenticator_data, client_data_json};

async fn enrolled(email: &str) -> (PasskeyFlow, SoftAuthenticator) {
    init_test_environment();
    let flow = PasskeyFlow::new();
    let authenticator = SoftAuthenticator::new();

    flow.register(email).await.unwrap();
    flow.set_credential(SetCredentialRequest {
        email: Some(email.to_string()),
        credentials: Some(authenticator.credential()),
    })
    .await
    .unwrap();

    (flow, authenticator)
}

fn login(email: &str, assertion: AssertionResponse) -> LoginRequest {
    LoginRequest {
        email: Some(email.to_string()),
        credential: Some(assertion),
    }
}

#[tokio::test]
async fn test_full_flow_authenticates() {
    let (flow, authenticator) = enrolled("a@b.com").await;

    let challenge = flow.get_credential("a@b.com").await.unwrap().challenge;
    let identity = flow
        .login(login("a@b.com", authenticator.assertion(&challenge)))
        .await
        .unwrap();

    assert_eq!(identity.email, "a@b.com");
    assert!(identity.is_enrolled());
}

#[tokio::test]
async fn test_login_never_registered() {
    let flow = PasskeyFlow::new();
    let authenticator = SoftAuthenticator::new();

    let result = flow
        .login(login("nobody@b.com", authenticator.assertion("123456789")))
        .await;

    assert!(matches!(result, Err(CoordinationError::NotFound(_))));
}

#[tokio::test]
async fn test_login_rejects_registration_ceremony_data() {
    let (flow, authenticator) = enrolled("a@b.com").await;
    let challenge = flow.get_credential("a@b.com").await.unwrap().challenge;

    // Correctly signed, but client data claims a create ceremony
    let auth_data = authenticator_data();
    let client_data = client_data_json("webauthn.create", &challenge);
    let assertion = AssertionResponse {
        authenticator_data: URL_SAFE_NO_PAD.encode(&auth_data),
        client_data_json: URL_SAFE_NO_PAD.encode(&client_data),
        signature: URL_SAFE_NO_PAD.encode(authenticator.sign(&auth_data, &client_data)),
    };

    let result = flow.login(login("a@b.com", assertion)).await;
    assert!(matches!(result, Err(CoordinationError::VerificationFailed(_))));
}

#[tokio::test]
async fn test_login_rejects_tampered_authenticator_data() {
    let (flow, authenticator) = enrolled("a@b.com").await;
    let challenge = flow.get_credential("a@b.com").await.unwrap().challenge;

    let mut assertion = authenticator.assertion(&challenge);
    let mut auth_data = URL_SAFE_NO_PAD
        .decode(&assertion.authenticator_data)
        .unwrap();
    auth_data[33] ^= 0xff;
    assertion.authenticator_data = URL_SAFE_NO_PAD.encode(auth_data);

    let result = flow.login(login("a@b.com", assertion)).await;
    assert!(matches!(result, Err(CoordinationError::VerificationFailed(_))));
}

#[tokio::test]
async fn test_each_login_needs_a_fresh_challenge() {
    let (flow, authenticator) = enrolled("a@b.com").await;

    for _ in 0..3 {
        let challenge = flow.get_credential("a@b.com").await.unwrap().challenge;
        flow.login(login("a@b.com", authenticator.assertion(&challenge)))
            .await
            .unwrap();
    }

    // No get-credential since the last login
    let result = flow
        .login(login("a@b.com", authenticator.assertion("000000000")))
        .await;
    assert!(matches!(result, Err(CoordinationError::VerificationFailed(_))));
}

#[tokio::test]
async fn test_failed_login_consumes_challenge() {
    let (flow, authenticator) = enrolled("a@b.com").await;
    let challenge = flow.get_credential("a@b.com").await.unwrap().challenge;

    let impostor = SoftAuthenticator::new();
    assert!(
        flow.login(login("a@b.com", impostor.assertion(&challenge)))
            .await
            .is_err()
    );

    // The genuine authenticator cannot reuse the burned challenge
    let result = flow
        .login(login("a@b.com", authenticator.assertion(&challenge)))
        .await;
    assert!(matches!(result, Err(CoordinationError::VerificationFailed(_))));
}
