use crate::helpers::{no_cb, spawn_app, spawn_offline_session, TestUser};
use hostelease_client_core::{LoginOutcome, MemoryTokenStore, SessionStatus};
use hostelease_shared::{req_args::LoginReqArgs, uac::Role};
use std::time::Duration;

#[tokio::test]
async fn login_failure_invalid_password() {
    // Arrange
    let app = spawn_app().await;
    let login_args = app
        .test_user
        .login_args()
        .password("random-password".to_string().into());

    // Act
    let outcome = app.session.login(login_args, no_cb).await.unwrap();

    // Assert
    assert_eq!(
        outcome,
        LoginOutcome::Failed("Invalid credentials".to_string())
    );
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    assert!(app.store.is_empty());
    assert!(!app.session.client().has_credential());
}

#[tokio::test]
async fn login_failure_invalid_user() {
    // Arrange
    let app = spawn_app().await;
    let login_args = LoginReqArgs::new("random-username", "random-password".to_string().into());

    // Act
    let outcome = app.session.login(login_args, no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.error(), Some("Invalid credentials"));
}

#[tokio::test]
async fn login_failure_server_unreachable() {
    // Arrange
    let store = MemoryTokenStore::new();
    let session = spawn_offline_session(&store);
    let login_args = TestUser::generate("offline").login_args();

    // Act
    let outcome = session.login(login_args, no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome, LoginOutcome::Failed("Login failed".to_string()));
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
}

#[tokio::test]
async fn login_success() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app.login().await;

    // Assert - Session
    assert_eq!(outcome, LoginOutcome::Success);
    let user = app.session.user().expect("user should be set after login");
    assert_eq!(user.username.as_ref(), app.test_user.username);
    assert_eq!(user.role, Role::Student);
    assert!(!app.session.is_loading());

    // Assert - Tokens persisted
    let access = app.stored_access_token().expect("access token not stored");
    assert!(access.starts_with("access-"));
    assert!(app
        .stored_refresh_token()
        .expect("refresh token not stored")
        .starts_with("refresh-"));

    // Assert - The user was loaded with the new token
    assert_eq!(
        app.authorization_sent_to("users/me/"),
        Some(format!("Bearer {access}"))
    );
    assert_eq!(
        app.authorization_sent_to("auth/token/"),
        None,
        "no credential should be sent before login"
    );
}

#[tokio::test]
async fn login_sends_credentials_as_json() {
    // Arrange
    let app = spawn_app().await;

    // Act
    assert!(app.login().await.is_success());

    // Assert
    let request = app.api.last_request_to("auth/token/").unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.body,
        Some(serde_json::json!({
            "username": app.test_user.username,
            "password": app.test_user.password,
        }))
    );
}

#[tokio::test]
async fn requests_after_login_carry_token() {
    // Arrange
    let app = spawn_app().await;
    assert!(app.login().await.is_success());
    let access = app.stored_access_token().unwrap();

    // Act
    let notices = app.session.client().list_notices(no_cb).await.unwrap();

    // Assert
    assert!(notices.is_ok());
    assert_eq!(
        app.authorization_sent_to("notices/"),
        Some(format!("Bearer {access}"))
    );
}

#[tokio::test]
async fn failed_login_keeps_existing_session() {
    // Arrange
    let app = spawn_app().await;
    assert!(app.login().await.is_success());
    let status_before = app.session.status();
    let access_before = app.stored_access_token();
    let bad_args = app
        .test_user
        .login_args()
        .password("wrong-password".to_string().into());

    // Act
    let outcome = app.session.login(bad_args, no_cb).await.unwrap();

    // Assert
    assert!(!outcome.is_success());
    assert_eq!(app.session.status(), status_before);
    assert_eq!(app.stored_access_token(), access_before);
    assert!(app.session.client().has_credential());
}

#[tokio::test]
async fn login_fails_when_user_cannot_be_loaded() {
    // Arrange
    let app = spawn_app().await;
    app.api.set_me_response(500, serde_json::json!({}));

    // Act
    let outcome = app.login().await;

    // Assert
    assert_eq!(outcome, LoginOutcome::Failed("Login failed".to_string()));
    assert!(
        app.api.last_request_to("auth/token/").is_some(),
        "tokens should have been issued"
    );
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    assert!(app.store.is_empty(), "nothing should be stored");
    assert!(!app.session.client().has_credential());
}

#[tokio::test]
async fn login_with_unreadable_user_keeps_existing_session() {
    // Arrange
    let app = spawn_app().await;
    assert!(app.login().await.is_success());
    let status_before = app.session.status();
    let access_before = app.stored_access_token().unwrap();
    let refresh_before = app.stored_refresh_token();
    app.api
        .set_me_response(200, serde_json::json!({"detail": "unexpected"}));

    // Act
    let outcome = app.login().await;

    // Assert
    assert_eq!(outcome, LoginOutcome::Failed("Login failed".to_string()));
    assert_ne!(
        app.authorization_sent_to("users/me/"),
        Some(format!("Bearer {access_before}")),
        "the new token should have been checked"
    );
    assert_eq!(app.session.status(), status_before);
    assert_eq!(app.stored_access_token(), Some(access_before.clone()));
    assert_eq!(app.stored_refresh_token(), refresh_before);

    // Assert - The old credential is still the one in use
    let notices = app.session.client().list_notices(no_cb).await.unwrap();
    assert!(notices.is_ok());
    assert_eq!(
        app.authorization_sent_to("notices/"),
        Some(format!("Bearer {access_before}"))
    );
}

#[tokio::test]
async fn logging_in_again_replaces_user() {
    // Arrange
    let app = spawn_app().await;
    let warden = TestUser::generate("warden");
    app.api.add_user(&warden, Role::Warden);
    assert!(app.login().await.is_success());

    // Act
    let outcome = app.session.login(warden.login_args(), no_cb).await.unwrap();

    // Assert
    assert!(outcome.is_success());
    let user = app.session.user().unwrap();
    assert_eq!(user.username.as_ref(), warden.username);
    assert!(user.is_staff());
}

#[tokio::test]
async fn concurrent_logins_last_to_complete_wins() {
    // Arrange
    let app = spawn_app().await;
    let slow_user = TestUser::generate("slow");
    app.api.add_user(&slow_user, Role::Warden);
    app.api
        .set_token_delay(&slow_user.username, Duration::from_millis(300));

    // Act
    let slow_rx = app.session.login(slow_user.login_args(), no_cb);
    let fast_rx = app.session.login(app.test_user.login_args(), no_cb);
    let fast_outcome = fast_rx.await.unwrap();
    let user_after_fast = app.session.user().unwrap();
    let slow_outcome = slow_rx.await.unwrap();

    // Assert
    assert!(fast_outcome.is_success());
    assert!(slow_outcome.is_success());
    assert_eq!(user_after_fast.username.as_ref(), app.test_user.username);
    assert_eq!(
        app.session.user().unwrap().username.as_ref(),
        slow_user.username
    );
}
