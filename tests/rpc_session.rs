mod common;

use common::{PASSWORD, TestApp, USERNAME};
use serde_json::json;

#[tokio::test]
async fn test_logon_issues_usable_session() {
    let app = TestApp::new();

    let session = app.logon().await;

    assert_eq!(session.len(), 64);
    assert!(session.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(app.add_advertiser(&session, "Acme").await > 0);
}

#[tokio::test]
async fn test_sessions_are_distinct() {
    let app = TestApp::new();

    assert_ne!(app.logon().await, app.logon().await);
}

#[tokio::test]
async fn test_wrong_credentials() {
    let app = TestApp::new();

    let (code, message) = app.fault("ox.logon", json!([USERNAME, "wrong"])).await;
    assert_eq!(code, -32011);
    assert_eq!(message, "Username or password is incorrect");

    let (_, message) = app.fault("ox.logon", json!(["root", PASSWORD])).await;
    assert_eq!(message, "Username or password is incorrect");
}

#[tokio::test]
async fn test_logoff_invalidates_session() {
    let app = TestApp::new();
    let session = app.logon().await;

    assert_eq!(app.result("ox.logoff", json!([session])).await, json!(true));

    let (code, message) = app
        .fault("ox.getAdvertiser", json!([session, 1]))
        .await;
    assert_eq!(code, -32011);
    assert_eq!(message, "Session ID is invalid");

    let (_, message) = app.fault("ox.logoff", json!([session])).await;
    assert_eq!(message, "Session ID is invalid");
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let mut settings = common::settings();
    settings.session_ttl = chrono::Duration::zero();
    let app = TestApp::with_settings(settings);

    let session = app.logon().await;

    let (_, message) = app
        .fault("ox.addAdvertiser", json!([session, { "advertiserName": "Acme" }]))
        .await;
    assert_eq!(message, "Session ID is invalid");
}
