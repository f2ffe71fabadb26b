use crate::{
    configuration::EmailSettings,
    domain::{ContactSubmission, EmailAddress, MessageSubject, SubmitterName},
    email_client::EmailClient,
};
use anyhow::anyhow;
use reqwest::StatusCode;

/// Relays validated contact submissions to the mail provider as two outbound
/// messages: an internal notification to the site operator and an
/// acknowledgment back to the submitter.
///
/// Both operations swallow their errors and report a plain boolean. Callers
/// cannot observe why a delivery failed, only that it did; the classification
/// in [`SendError`] exists for the logs.
#[derive(Debug)]
pub struct NotificationRelay {
    settings: EmailSettings,
}

impl NotificationRelay {
    pub fn new(settings: EmailSettings) -> Self {
        Self { settings }
    }

    /// Notify the operator about a new submission.
    #[tracing::instrument(
        name = "Sending internal notification",
        skip(self, submission),
        fields(
            submitter_email = %submission.email,
            submitter_name = %submission.name,
        )
    )]
    pub async fn send_internal_notification(&self, submission: &ContactSubmission) -> bool {
        match self.try_send_internal_notification(submission).await {
            Ok(()) => {
                tracing::info!("Internal notification delivered");
                true
            }
            Err(error) => {
                log_delivery_failure("internal notification", &error);
                false
            }
        }
    }

    /// Send the fixed thank-you message back to the submitter.
    #[tracing::instrument(
        name = "Sending acknowledgment",
        skip(self, name, email),
        fields(submitter_email = %email)
    )]
    pub async fn send_acknowledgment(&self, name: &SubmitterName, email: &EmailAddress) -> bool {
        match self.try_send_acknowledgment(name, email).await {
            Ok(()) => {
                tracing::info!("Acknowledgment delivered");
                true
            }
            Err(error) => {
                log_delivery_failure("acknowledgment", &error);
                false
            }
        }
    }

    async fn try_send_internal_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), SendError> {
        let client = self.transport_client()?;
        let operator = EmailAddress::parse(self.settings.operator.clone())
            .map_err(|e| SendError::Envelope(anyhow!("operator address is invalid: {e}")))?;

        let subject = internal_subject(&submission.name, &submission.subject);
        let text_body = internal_text_body(submission);
        let html_body = internal_html_body(submission);

        client
            .send_email(&operator, &subject, &html_body, &text_body)
            .await
            .map_err(classify_transport_error)
    }

    async fn try_send_acknowledgment(
        &self,
        name: &SubmitterName,
        email: &EmailAddress,
    ) -> Result<(), SendError> {
        let client = self.transport_client()?;

        let text_body = acknowledgment_text_body(name);
        let html_body = acknowledgment_html_body(name);

        client
            .send_email(email, "Thank you for contacting me!", &html_body, &text_body)
            .await
            .map_err(classify_transport_error)
    }

    /// Build the transport client for a single delivery. Both credential
    /// values must be present; if either is missing the attempt fails here,
    /// before any network activity.
    fn transport_client(&self) -> Result<EmailClient, SendError> {
        let sender = self
            .settings
            .sender
            .as_ref()
            .ok_or(SendError::MissingCredentials)?;
        let authorization_token = self
            .settings
            .authorization_token
            .as_ref()
            .ok_or(SendError::MissingCredentials)?;

        let sender = EmailAddress::parse(sender.clone())
            .map_err(|e| SendError::Configuration(anyhow!("sender address is invalid: {e}")))?;
        let base_url = self
            .settings
            .base_url()
            .map_err(|e| SendError::Configuration(anyhow!("provider base url is invalid: {e}")))?;

        EmailClient::new(
            base_url,
            sender,
            authorization_token.clone(),
            self.settings.timeout(),
        )
        .map_err(SendError::Transport)
    }
}

/// Why a delivery attempt failed. Never escapes the relay; logged and then
/// collapsed to `false`.
#[derive(thiserror::Error)]
pub enum SendError {
    #[error("Mail transport credentials are not configured")]
    MissingCredentials,
    #[error("Mail transport configuration is invalid")]
    Configuration(#[source] anyhow::Error),
    #[error("Mail provider rejected the configured credentials")]
    Authentication(#[source] reqwest::Error),
    #[error("Mail provider rejected the message envelope")]
    Envelope(#[source] anyhow::Error),
    #[error("Failed to hand the message to the mail provider")]
    Transport(#[source] reqwest::Error),
}

fn classify_transport_error(error: reqwest::Error) -> SendError {
    match error.status() {
        Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => SendError::Authentication(error),
        Some(StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY) => {
            SendError::Envelope(error.into())
        }
        _ => SendError::Transport(error),
    }
}

fn log_delivery_failure(message_kind: &str, error: &SendError) {
    match error {
        SendError::MissingCredentials | SendError::Configuration(_) => {
            tracing::error!(error = ?error, "Mail transport is not configured; dropping {message_kind}");
        }
        SendError::Authentication(_) => {
            tracing::error!(error = ?error, "Authentication with the mail provider failed while sending {message_kind}");
        }
        SendError::Envelope(_) => {
            tracing::error!(error = ?error, "Mail provider rejected the {message_kind} envelope");
        }
        SendError::Transport(_) => {
            tracing::error!(error = ?error, "Failed to deliver {message_kind}");
        }
    }
}

fn internal_subject(name: &SubmitterName, subject: &MessageSubject) -> String {
    format!("Portfolio contact / {name} / {subject}")
}

fn internal_text_body(submission: &ContactSubmission) -> String {
    format!("{}\n\n{}", submission.message, submission.email)
}

fn internal_html_body(submission: &ContactSubmission) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; white-space: pre-wrap;\">\
         {}<br><br>{}</div>",
        submission.message.as_ref().replace('\n', "<br>"),
        submission.email
    )
}

fn acknowledgment_text_body(name: &SubmitterName) -> String {
    format!(
        "Hi {name},\n\n\
         Thank you for contacting me through my portfolio website. I've received \
         your message and will get back to you as soon as possible.\n\n\
         Best regards\n\n\
         This is an automated response. Please do not reply to this email."
    )
}

fn acknowledgment_html_body(name: &SubmitterName) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #333;\">Thank you for reaching out!</h2>\
         <p>Hi {name},</p>\
         <p>Thank you for contacting me through my portfolio website. I've received \
         your message and will get back to you as soon as possible.</p>\
         <p>Best regards</p>\
         <hr style=\"margin: 30px 0; border: none; border-top: 1px solid #eee;\">\
         <p style=\"color: #666; font-size: 12px;\">\
         This is an automated response. Please do not reply to this email.</p></div>"
    )
}
