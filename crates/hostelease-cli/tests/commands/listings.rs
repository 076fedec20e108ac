use crate::helpers::{spawn_cli, spawn_cli_with_role};
use hostelease_cli::cli::Command;
use hostelease_shared::uac::Role;
use serde_json::json;

#[tokio::test]
async fn notices_printed_as_json() {
    // Arrange
    let cli = spawn_cli().await;
    cli.login().await;

    // Act
    let notices = cli.run_json(Command::Notices).await;

    // Assert
    assert_eq!(notices, json!([{ "id": 1, "path": "notices/" }]));
    assert_eq!(
        cli.api.last_request_to("notices/").unwrap().query,
        "ordering=-created_at"
    );
}

#[tokio::test]
async fn listing_requires_login() {
    // Arrange
    let cli = spawn_cli().await;

    // Act
    let outcome = cli.run(Command::Complaints).await;

    // Assert
    assert!(outcome.is_err());
    assert!(
        cli.api.last_request_to("complaints/").is_none(),
        "nothing should be sent without a login"
    );
}

#[tokio::test]
async fn dashboard_combines_stats() {
    // Arrange
    let cli = spawn_cli_with_role(Role::Admin).await;
    cli.login().await;

    // Act
    let dashboard = cli.run_json(Command::Dashboard).await;

    // Assert
    assert_eq!(dashboard["overview"][0]["path"], "dashboard/stats/");
    assert_eq!(dashboard["rooms"][0]["path"], "rooms/stats/");
    assert_eq!(dashboard["payments"][0]["path"], "payments/stats/");
}

#[tokio::test]
async fn rooms_lists_available_and_allocations() {
    // Arrange
    let cli = spawn_cli().await;
    cli.login().await;

    // Act
    let rooms = cli.run_json(Command::Rooms).await;

    // Assert
    assert_eq!(rooms["available"][0]["path"], "rooms/available/");
    assert_eq!(
        rooms["active_allocations"][0]["path"],
        "allocations/active/"
    );
}

#[tokio::test]
async fn warden_lists_students() {
    // Arrange
    let cli = spawn_cli_with_role(Role::Warden).await;
    cli.login().await;

    // Act
    let students = cli.run_json(Command::Students).await;

    // Assert
    assert_eq!(students, json!([]));
}
