use crate::helpers::{no_cb, spawn_app, spawn_offline_session, TestUser};
use hostelease_client_core::{MemoryTokenStore, RegisterOutcome, SessionStatus};
use hostelease_shared::{req_args::RegisterReqArgs, uac::Role};
use serde_json::json;

fn register_args(user: &TestUser) -> RegisterReqArgs {
    RegisterReqArgs::new(
        user.username.clone(),
        format!("{}@example.com", user.username),
        user.password.clone().into(),
    )
    .name("New", "Student")
    .phone_number("0123456789")
}

#[tokio::test]
async fn register_success() {
    // Arrange
    let app = spawn_app().await;
    let new_user = TestUser::generate("new");

    // Act
    let outcome = app
        .session
        .register(&register_args(&new_user), no_cb)
        .await
        .unwrap();

    // Assert
    let RegisterOutcome::Created(user) = outcome else {
        panic!("expected account to be created but got: {outcome:?}");
    };
    assert_eq!(user.username.as_ref(), new_user.username);
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.first_name, "New");
    assert_eq!(user.phone_number, "0123456789");
    assert!(app.api.has_user(&new_user.username));
}

#[tokio::test]
async fn register_success_with_registration_fields_only() {
    // Arrange
    let app = spawn_app().await;
    app.api.set_register_response(
        201,
        json!({
            "username": "bob",
            "email": "bob@example.com",
            "first_name": "Bob",
            "last_name": "B",
            "phone_number": "012",
            "date_of_birth": null,
            "address": "",
            "emergency_contact": "",
            "role": "student",
        }),
    );

    // Act
    let outcome = app
        .session
        .register(&register_args(&TestUser::generate("bob")), no_cb)
        .await
        .unwrap();

    // Assert
    let RegisterOutcome::Created(user) = outcome else {
        panic!("expected account to be created but got: {outcome:?}");
    };
    assert_eq!(user.username.as_ref(), "bob");
    assert_eq!(user.phone_number, "012");
    assert_eq!(user.date_of_birth, None);
}

#[tokio::test]
async fn register_does_not_log_in() {
    // Arrange
    let app = spawn_app().await;
    let new_user = TestUser::generate("new");

    // Act
    let outcome = app
        .session
        .register(&register_args(&new_user), no_cb)
        .await
        .unwrap();

    // Assert
    assert!(outcome.is_created());
    assert_eq!(app.session.status(), SessionStatus::Unauthenticated);
    assert!(app.store.is_empty());
    assert_eq!(
        app.api.last_request_to("register/").unwrap().authorization,
        None
    );
}

#[tokio::test]
async fn register_then_login() {
    // Arrange
    let app = spawn_app().await;
    let new_user = TestUser::generate("new");
    let outcome = app
        .session
        .register(&register_args(&new_user).role(Role::Warden), no_cb)
        .await
        .unwrap();
    assert!(outcome.is_created());

    // Act
    let outcome = app.session.login(new_user.login_args(), no_cb).await.unwrap();

    // Assert
    assert!(outcome.is_success());
    assert_eq!(app.session.user().unwrap().role, Role::Warden);
}

#[tokio::test]
async fn register_sends_profile() {
    // Arrange
    let app = spawn_app().await;
    let new_user = TestUser::generate("new");

    // Act
    let _ = app
        .session
        .register(&register_args(&new_user), no_cb)
        .await
        .unwrap();

    // Assert
    let body = app.api.last_request_to("register/").unwrap().body.unwrap();
    assert_eq!(body["username"], new_user.username.as_str());
    assert_eq!(body["password"], new_user.password.as_str());
    assert_eq!(body["password_confirm"], new_user.password.as_str());
    assert_eq!(body["first_name"], "New");
    assert_eq!(body["last_name"], "Student");
    assert_eq!(body["phone_number"], "0123456789");
    assert_eq!(body["role"], "student");
}

#[tokio::test]
async fn register_failure_shows_each_field_error() {
    // Arrange
    let app = spawn_app().await;
    app.api.set_register_response(
        400,
        json!({
            "email": ["Already in use"],
            "non_field_errors": ["Passwords do not match"],
        }),
    );

    // Act
    let outcome = app
        .session
        .register(&register_args(&TestUser::generate("new")), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome,
        RegisterOutcome::Failed("email: Already in use\nPasswords do not match".to_string())
    );
}

#[tokio::test]
async fn register_failure_password_mismatch() {
    // Arrange
    let app = spawn_app().await;
    let new_user = TestUser::generate("new");
    let args = register_args(&new_user).password_confirm("something-else".to_string().into());

    // Act
    let outcome = app.session.register(&args, no_cb).await.unwrap();

    // Assert
    assert_eq!(outcome.error(), Some("Passwords don't match"));
    assert!(!app.api.has_user(&new_user.username));
}

#[tokio::test]
async fn register_failure_username_taken() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app
        .session
        .register(&register_args(&app.test_user), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome.error(),
        Some("username: A user with that username already exists.")
    );
}

#[tokio::test]
async fn register_failure_without_body_uses_fallback() {
    // Arrange
    let app = spawn_app().await;
    app.api.set_register_response(500, json!({}));

    // Act
    let outcome = app
        .session
        .register(&register_args(&TestUser::generate("new")), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(outcome.error(), Some("Registration failed"));
}

#[tokio::test]
async fn register_failure_server_unreachable() {
    // Arrange
    let store = MemoryTokenStore::new();
    let session = spawn_offline_session(&store);

    // Act
    let outcome = session
        .register(&register_args(&TestUser::generate("new")), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(
        outcome,
        RegisterOutcome::Failed("Registration failed".to_string())
    );
}
