use crate::domain::EmailAddress;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Thin client for the mail provider's HTTP delivery API.
#[derive(Debug)]
pub struct EmailClient {
    base_url: Url,
    sender: EmailAddress,
    http_client: Client,
    authorization_token: Secret<String>,
}

impl EmailClient {
    /// Create a new email client with a per-request timeout.
    pub fn new(
        base_url: Url,
        sender: EmailAddress,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            sender,
            http_client,
            authorization_token,
        })
    }

    /// Hand one composed message to the provider. Non-success responses from
    /// the provider surface as errors carrying the response status, which the
    /// relay uses to classify the failure.
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join("email")
            .expect("url to always be valid at this point");
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            subject,
            text_body,
            html_body,
        };

        self.http_client
            .post(url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    html_body: &'a str,
}
