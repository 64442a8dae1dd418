use passkey_enroll::{
    CoordinationError, EnrollmentState, PasskeyFlow, SetCredentialRequest, generate_digits,
};

use crate::common::{SoftAuthenticator, init_test_environment};

fn bind_request(email: &str, authenticator: &SoftAuthenticator) -> SetCredentialRequest {
    SetCredentialRequest {
        email: Some(email.to_string()),
        credentials: Some(authenticator.credential()),
    }
}

#[tokio::test]
async fn test_register_then_enroll() {
    init_test_environment();
    let flow = PasskeyFlow::new();
    let authenticator = SoftAuthenticator::new();

    let registered = flow.register("a@b.com").await.unwrap();
    assert_eq!(registered.user.id.len(), 9);
    assert_eq!(registered.challenge.len(), 9);

    let listed = flow.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].state(), EnrollmentState::Registered);

    let message = flow
        .set_credential(bind_request("a@b.com", &authenticator))
        .await
        .unwrap();
    assert_eq!(message, "Registration complete. Now try logging in");

    let fetched = flow.get_credential("a@b.com").await.unwrap();
    assert_eq!(fetched.user.id, registered.user.id);
    assert_eq!(fetched.user.state(), EnrollmentState::Enrolled);
    assert_eq!(
        fetched.user.credential.unwrap().credential_id,
        authenticator.credential().credential_id
    );
}

#[tokio::test]
async fn test_list_includes_partial_registrations() {
    let flow = PasskeyFlow::new();
    let authenticator = SoftAuthenticator::new();

    flow.register("a@b.com").await.unwrap();
    flow.register("c@d.com").await.unwrap();
    flow.set_credential(bind_request("c@d.com", &authenticator))
        .await
        .unwrap();

    let states: Vec<(String, EnrollmentState)> = flow
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|i| (i.email.clone(), i.state()))
        .collect();

    assert_eq!(
        states,
        vec![
            ("a@b.com".to_string(), EnrollmentState::Registered),
            ("c@d.com".to_string(), EnrollmentState::Enrolled),
        ]
    );
}

#[tokio::test]
async fn test_abandoned_registration_can_start_over() {
    let flow = PasskeyFlow::new();
    let authenticator = SoftAuthenticator::new();

    flow.register("a@b.com").await.unwrap();

    // The lookup prunes the stalled registration
    assert!(matches!(
        flow.get_credential("a@b.com").await,
        Err(CoordinationError::NotFound(_))
    ));
    assert!(flow.list().await.unwrap().is_empty());

    // Binding now has nothing to attach to
    assert!(matches!(
        flow.set_credential(bind_request("a@b.com", &authenticator)).await,
        Err(CoordinationError::NotFound(_))
    ));

    flow.register("a@b.com").await.unwrap();
    flow.set_credential(bind_request("a@b.com", &authenticator))
        .await
        .unwrap();
    assert!(flow.get_credential("a@b.com").await.is_ok());
}

#[tokio::test]
async fn test_clones_share_the_store() {
    let flow = PasskeyFlow::new();
    let other = flow.clone();

    flow.register("a@b.com").await.unwrap();

    assert_eq!(other.list().await.unwrap().len(), 1);
}

#[test]
fn test_generated_ids_are_digits() {
    for count in [0, 1, 9, 32] {
        let digits = generate_digits(count, 0, 9).unwrap();
        assert_eq!(digits.len(), count);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
    }
}
