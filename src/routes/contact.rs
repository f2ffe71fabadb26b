use crate::{
    domain::{ContactSubmission, EmailAddress, MessageBody, MessageSubject, SubmitterName},
    extract::JsonOrForm,
    relay::NotificationRelay,
    routes::ApiMessage,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use utoipa::ToSchema;

/// Raw contact-form payload. Missing fields deserialize as empty strings so
/// that presence and non-emptiness share a single validation path.
#[derive(Debug, Default, serde::Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct FieldError {
    field: &'static str,
    message: String,
}

#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl TryFrom<ContactForm> for ContactSubmission {
    type Error = Vec<FieldError>;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = collect(SubmitterName::parse(form.name), "name", &mut errors);
        let email = collect(EmailAddress::parse(form.email), "email", &mut errors);
        let subject = collect(MessageSubject::parse(form.subject), "subject", &mut errors);
        let message = collect(MessageBody::parse(form.message), "message", &mut errors);

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(Self {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(errors),
        }
    }
}

fn collect<T>(
    result: Result<T, String>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}

/// Create a router to serve the contact-form endpoint.
pub fn create_router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

/// Accept a contact-form submission and relay it as email.
///
/// The acknowledgment is attempted unconditionally after the internal
/// notification, and its outcome never reaches the caller; only the internal
/// notification decides between 201 and 500.
#[tracing::instrument(
    name = "Handling a contact submission",
    skip(relay, form),
    fields(
        submitter_email = %form.email,
        submitter_name = %form.name,
    )
)]
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactForm,
    responses(
        (status = CREATED, description = "Submission relayed to the operator", body = ApiMessage),
        (status = BAD_REQUEST, description = "One or more fields failed validation", body = ValidationErrors),
        (status = INTERNAL_SERVER_ERROR, description = "Mail delivery failed", body = ApiMessage),
    )
)]
pub async fn submit(
    State(relay): State<Arc<NotificationRelay>>,
    JsonOrForm(form): JsonOrForm<ContactForm>,
) -> Response {
    let submission: ContactSubmission = match form.try_into() {
        Ok(submission) => submission,
        Err(errors) => {
            return (StatusCode::BAD_REQUEST, Json(ValidationErrors { errors })).into_response()
        }
    };

    let notified = relay.send_internal_notification(&submission).await;
    relay
        .send_acknowledgment(&submission.name, &submission.email)
        .await;

    if notified {
        (
            StatusCode::CREATED,
            Json(ApiMessage::new("Message sent successfully!")),
        )
            .into_response()
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiMessage::new(
                "Failed to send email. Please check server configuration.",
            )),
        )
            .into_response()
    }
}
