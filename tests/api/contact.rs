use crate::utils::{spawn_app, spawn_app_with_settings, spawn_app_without_mail_credentials};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, ResponseTemplate,
};

fn valid_payload() -> serde_json::Value {
    json!({
        "name": "Ava",
        "email": "ava@x.com",
        "subject": "Hi",
        "message": "Hello"
    })
}

#[tokio::test]
async fn contact_returns_a_201_for_a_valid_json_payload() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&valid_payload()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Message sent successfully!");
}

#[tokio::test]
async fn contact_accepts_form_encoded_payloads() {
    // Arrange
    let app = spawn_app().await;
    app.mock_mail_provider_to_ok().await;
    let body = serde_urlencoded::to_string([
        ("name", "Le Guin"),
        ("email", "ursula_le_guin@gmail.com"),
        ("subject", "A question"),
        ("message", "Hello there"),
    ])
    .unwrap();

    // Act
    let response = app.post_contact_form(body).await;

    // Assert
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn contact_rejects_unsupported_content_types() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .api_client()
        .post(format!("{}/api/contact", app.address()))
        .header("Content-Type", "text/plain")
        .body("hello")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[rstest]
#[case(json!({"email": "ava@x.com", "subject": "Hi", "message": "Hello"}), "missing the name")]
#[case(json!({"name": "Ava", "subject": "Hi", "message": "Hello"}), "missing the email")]
#[case(json!({"name": "Ava", "email": "ava@x.com", "message": "Hello"}), "missing the subject")]
#[case(json!({"name": "Ava", "email": "ava@x.com", "subject": "Hi"}), "missing the message")]
#[case(json!({"name": "", "email": "ava@x.com", "subject": "Hi", "message": "Hello"}), "empty name")]
#[case(json!({"name": "   ", "email": "ava@x.com", "subject": "Hi", "message": "Hello"}), "whitespace-only name")]
#[case(json!({"name": "Ava", "email": "definitely-not-an-email", "subject": "Hi", "message": "Hello"}), "invalid email")]
#[case(json!({"name": "Ava", "email": "ava@x.com", "subject": "", "message": "Hello"}), "empty subject")]
#[case(json!({"name": "Ava", "email": "ava@x.com", "subject": "Hi", "message": ""}), "empty message")]
#[tokio::test]
async fn contact_returns_a_400_and_delivers_nothing_when_the_payload_is_invalid(
    #[case] payload: serde_json::Value,
    #[case] description: &str,
) {
    // Arrange
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&payload).await;

    // Assert
    assert_eq!(
        response.status(),
        StatusCode::BAD_REQUEST,
        // Additional customised error message on test failure
        "The API did not fail with 400 Bad Request when the payload was {}.",
        description
    );
    let body: serde_json::Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().unwrap();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e["field"].is_string() && e["message"].is_string()));
}

#[tokio::test]
async fn the_internal_notification_is_sent_before_the_acknowledgment() {
    // Arrange
    let app = spawn_app().await;
    app.mock_mail_provider_to_ok().await;

    // Act
    app.post_contact(&valid_payload()).await;

    // Assert
    let requests = app.email_server().received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let internal: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(internal["To"], app.operator().as_str());
    let subject = internal["Subject"].as_str().unwrap();
    assert!(subject.contains("Ava"));
    assert!(subject.contains("Hi"));
    assert!(internal["TextBody"].as_str().unwrap().contains("ava@x.com"));

    let acknowledgment: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(acknowledgment["To"], "ava@x.com");
    assert_eq!(acknowledgment["Subject"], "Thank you for contacting me!");
}

#[tokio::test]
async fn contact_returns_a_500_when_the_internal_notification_fails() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({"To": app.operator()})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(app.email_server())
        .await;
    // The acknowledgment is still attempted after the failure.
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({"To": "ava@x.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&valid_payload()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Failed to send email. Please check server configuration."
    );
}

#[tokio::test]
async fn a_failed_acknowledgment_does_not_change_the_response() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({"To": app.operator()})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(app.email_server())
        .await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .and(body_partial_json(json!({"To": "ava@x.com"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&valid_payload()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn contact_returns_a_500_and_delivers_nothing_without_mail_credentials() {
    // Arrange
    let app = spawn_app_without_mail_credentials().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&valid_payload()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Failed to send email. Please check server configuration."
    );
}

#[tokio::test]
async fn authentication_failures_at_the_provider_fail_the_submission_closed() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(app.email_server())
        .await;

    // Act
    let response = app.post_contact(&valid_payload()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn requests_over_the_rate_limit_are_rejected() {
    // Arrange
    let app = spawn_app_with_settings(|settings| {
        settings.rate_limit.max_requests = 2;
    })
    .await;

    // Act
    assert_eq!(app.health_check().await.status(), StatusCode::OK);
    assert_eq!(app.health_check().await.status(), StatusCode::OK);
    let response = app.health_check().await;

    // Assert
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Too many requests from this IP, please try again later."
    );
}
