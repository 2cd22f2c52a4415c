//! End-to-end tests for the submission endpoint
//!
//! These tests drive the full router with a recording mail transport, and
//! run a real client against the endpoint on an ephemeral port.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower::ServiceExt;

use jobready::application::{ApplicationDraft, Field, FieldValue, SubmittedApplication};
use jobready::config::{ClientConfig, SmtpConfig};
use jobready::mailer::{MailDispatcher, RecordingTransport};
use jobready::rest::{build_router, serve_with_shutdown, ApiState};
use jobready::submission::{HttpSubmissionClient, SubmitApplication, SubmitError};
use jobready::wizard::{SubmissionStatus, SubmitOutcome, Wizard};

// ─── Fixtures ─────────────────────────────────────────────────────────────────

fn smtp_config() -> SmtpConfig {
    SmtpConfig {
        host: Some("smtp.example.com".to_string()),
        username: Some("mailer".to_string()),
        password: Some("secret".to_string()),
        from: Some("Heubert <noreply@heubert.com>".to_string()),
        admin_email: Some("admissions@heubert.com".to_string()),
        ..SmtpConfig::default()
    }
}

fn state_with(smtp: &SmtpConfig) -> (ApiState, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = MailDispatcher::with_transport(smtp, transport.clone()).unwrap();
    (ApiState::new(dispatcher), transport)
}

fn complete_values() -> Vec<(Field, FieldValue)> {
    vec![
        (Field::Name, "Ada Lovelace".into()),
        (Field::Email, "ada@example.com".into()),
        (Field::Phone, "0412345678".into()),
        (Field::StreetAddress, "1 George St".into()),
        (Field::City, "Sydney".into()),
        (Field::State, "nsw".into()),
        (Field::Postcode, "2000".into()),
        (Field::Education, "bachelor".into()),
        (Field::FieldOfStudy, "Computer Science".into()),
        (Field::Institution, "UNSW".into()),
        (Field::Country, "au".into()),
        (Field::HasItExperience, "no".into()),
        (Field::SelectedCourse, "helpdesk-l1".into()),
        (Field::Intake, "2026-10-25".into()),
        (Field::AcceptFalseInfo, true.into()),
        (Field::AcceptTerms, true.into()),
    ]
}

fn application() -> SubmittedApplication {
    let mut draft = ApplicationDraft::new();
    for (field, value) in complete_values() {
        draft.set(field, value).unwrap();
    }
    assert!(draft.is_complete());
    draft.freeze(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())
}

async fn post_application(state: ApiState, body: String) -> (StatusCode, serde_json::Value) {
    let response = build_router(state)
        .oneshot(
            Request::post("/api/submit-application")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Serve on an ephemeral port; dropping the sender stops the server
async fn spawn_server(state: ApiState) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(serve_with_shutdown(listener, state, async {
        let _ = rx.await;
    }));
    (format!("http://{addr}/api/submit-application"), tx)
}

fn client_for(endpoint: String) -> HttpSubmissionClient {
    HttpSubmissionClient::new(&ClientConfig {
        endpoint,
        timeout_secs: 5,
    })
    .unwrap()
}

// ─── Router ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_valid_application_sends_both_emails() {
    let (state, transport) = state_with(&smtp_config());
    let body = serde_json::to_string(&application()).unwrap();

    let (status, json) = post_application(state, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "success": true }));

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "ada@example.com");
    assert_eq!(sent[0].subject, "Application Received - Heubert's Job Ready Program");
    assert!(sent[0].html.contains("Ada Lovelace"));
    assert_eq!(sent[1].to, "admissions@heubert.com");
    assert!(sent[1].subject.contains("Ada Lovelace"));
    assert!(sent[1].html.contains("IT Helpdesk Support (L1) - 6 weeks"));
    assert!(sent[1].html.contains("Sunday, 25 October 2026"));
}

#[tokio::test]
async fn test_wire_format_uses_camel_case_names() {
    let json = serde_json::to_value(application()).unwrap();
    assert_eq!(json["hasITExperience"], "no");
    assert_eq!(json["selectedCourse"], "helpdesk-l1");
    assert_eq!(json["acceptTerms"], true);
    assert!(json["submittedAt"].is_string());
}

#[tokio::test]
async fn test_missing_credentials_fail_without_sending() {
    let smtp = SmtpConfig {
        username: None,
        password: None,
        ..smtp_config()
    };
    let (state, transport) = state_with(&smtp);
    let body = serde_json::to_string(&application()).unwrap();

    let (status, json) = post_application(state, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Missing required email configuration");
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_unreachable_mail_server() {
    let transport = Arc::new(RecordingTransport::unreachable());
    let dispatcher = MailDispatcher::with_transport(&smtp_config(), transport.clone()).unwrap();
    let state = ApiState::new(dispatcher);
    let body = serde_json::to_string(&application()).unwrap();

    let (status, json) = post_application(state, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to connect to email server");
    assert!(transport.sent().is_empty());
}

// ─── Client round trip ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wizard_submits_through_http_client() {
    let (state, transport) = state_with(&smtp_config());
    let (endpoint, shutdown) = spawn_server(state).await;
    let client = client_for(endpoint);

    let mut wizard = Wizard::new();
    for (field, value) in complete_values() {
        wizard.set_field(field, value).unwrap();
    }
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
    for _ in 0..4 {
        wizard.advance(now);
    }

    let outcome = wizard.submit(&client, now).await;

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert_eq!(wizard.status(), SubmissionStatus::Submitted);
    assert_eq!(transport.sent().len(), 2);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_client_surfaces_server_error_message() {
    let (state, transport) = state_with(&SmtpConfig::default());
    let (endpoint, shutdown) = spawn_server(state).await;
    let client = client_for(endpoint);

    let err = client.submit(&application()).await.unwrap_err();

    assert!(matches!(err, SubmitError::Rejected { status: 500, .. }));
    assert_eq!(err.to_string(), "Missing required email configuration");
    assert!(transport.sent().is_empty());
    let _ = shutdown.send(());
}

#[tokio::test]
async fn test_client_reports_unreachable_endpoint() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}/api/submit-application"));
    let err = client.submit(&application()).await.unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)));
}
