use crate::helpers::{no_cb, spawn_app, spawn_offline_session};
use hostelease_client_core::{MemoryTokenStore, SessionStatus, SessionView, TokenStore};

#[tokio::test]
async fn bootstrap_without_persisted_token() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let status = app.session.bootstrap(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(
        app.session.view(),
        SessionView {
            user: None,
            loading: false
        }
    );
    assert!(
        app.api.requests().is_empty(),
        "no request should be made without a token"
    );
}

#[tokio::test]
async fn bootstrap_restores_session_from_valid_token() {
    // Arrange
    let app = spawn_app().await;
    let token = app.api.issue_token(&app.test_user.username);
    app.seed_tokens(&token);
    let session = app.restart();

    // Assert - Loading until the token is checked
    assert!(session.is_loading());

    // Act
    let status = session.bootstrap(no_cb).await.unwrap();

    // Assert
    let user = status.user().expect("session should be authenticated");
    assert_eq!(user.username.as_ref(), app.test_user.username);
    assert_eq!(session.status(), status);
    assert!(!session.is_loading());
    assert_eq!(
        app.authorization_sent_to("users/me/"),
        Some(format!("Bearer {token}"))
    );
    assert_eq!(app.stored_access_token(), Some(token));
}

#[tokio::test]
async fn bootstrap_discards_rejected_token() {
    // Arrange
    let app = spawn_app().await;
    app.seed_tokens("access-expired");
    let session = app.restart();

    // Act
    let status = session.bootstrap(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(app.store.is_empty(), "both tokens should be removed");
    assert!(!session.client().has_credential());
}

#[tokio::test]
async fn bootstrap_discards_token_revoked_since_last_run() {
    // Arrange
    let app = spawn_app().await;
    assert!(app.login().await.is_success());
    app.api.revoke_all_tokens();
    let session = app.restart();

    // Act
    let status = session.bootstrap(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(app.stored_access_token(), None);
    assert_eq!(app.stored_refresh_token(), None);
}

#[tokio::test]
async fn bootstrap_with_unreachable_server_does_not_fail() {
    // Arrange
    let store = MemoryTokenStore::new();
    store.set("token", "access-unchecked").unwrap();
    let session = spawn_offline_session(&store);

    // Act
    let status = session.bootstrap(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert!(!session.is_loading());
    assert!(store.is_empty());
}

#[tokio::test]
async fn bootstrap_notifies_ui() {
    // Arrange
    let app = spawn_app().await;
    let token = app.api.issue_token(&app.test_user.username);
    app.seed_tokens(&token);
    let session = app.restart();
    let (tx, rx) = std::sync::mpsc::channel();

    // Act
    let status = session
        .bootstrap(move || tx.send(()).unwrap())
        .await
        .unwrap();

    // Assert
    assert!(status.is_authenticated());
    assert!(rx.try_recv().is_ok(), "ui callback should have been called");
}

#[tokio::test]
async fn bootstrap_discards_token_when_user_cannot_be_read() {
    // Arrange
    let app = spawn_app().await;
    let token = app.api.issue_token(&app.test_user.username);
    app.seed_tokens(&token);
    app.api
        .set_me_response(200, serde_json::json!({"unexpected": true}));
    let session = app.restart();

    // Act
    let status = session.bootstrap(no_cb).await.unwrap();

    // Assert
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(app.store.is_empty(), "both tokens should be removed");
    assert!(!session.client().has_credential());
}

#[tokio::test]
async fn bootstrap_result_ignored_after_logout() {
    // Arrange
    let app = spawn_app().await;
    let token = app.api.issue_token(&app.test_user.username);
    app.seed_tokens(&token);
    let session = app.restart();

    // Act
    let rx = session.bootstrap(no_cb);
    session.logout();
    let status = rx.await.unwrap();

    // Assert
    assert_eq!(
        app.authorization_sent_to("users/me/"),
        Some(format!("Bearer {token}")),
        "the token should have been accepted by the api"
    );
    assert_eq!(status, SessionStatus::Unauthenticated);
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(!session.client().has_credential());
    assert!(app.store.is_empty());
}
