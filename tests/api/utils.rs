use derive_getters::Getters;
use once_cell::sync::Lazy;
use portfolio_backend::{
    configuration::{get_configuration, Settings},
    telemetry::{get_subscriber, init_subscriber},
    App,
};
use secrecy::Secret;
use std::net::TcpListener;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test".into(), std::io::stdout));
    } else {
        init_subscriber(get_subscriber("test".into(), std::io::sink));
    };
});

#[derive(Getters)]
pub struct TestApp {
    address: String,
    email_server: MockServer,
    operator: String,
    api_client: reqwest::Client,
}

impl TestApp {
    /// Accept any number of deliveries on the mock mail provider.
    pub async fn mock_mail_provider_to_ok(&self) {
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.email_server)
            .await;
    }

    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_form(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path}", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn health_check(&self) -> reqwest::Response {
        self.get("/api/health").await
    }
}

/// Spawn an instance of the app on a random port, with the mail provider
/// replaced by a [`MockServer`] and working credentials in place.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_settings(|_| {}).await
}

/// Like [`spawn_app`], but with both mail credential values absent.
pub async fn spawn_app_without_mail_credentials() -> TestApp {
    spawn_app_with_settings(|settings| {
        settings.email.sender = None;
        settings.email.authorization_token = None;
    })
    .await
}

pub async fn spawn_app_with_settings(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let settings = {
        let mut c = get_configuration().expect("Failed to read configuration");

        // Point the relay at the mock provider.
        c.email.base_url = email_server.uri();
        c.email.sender = Some("no-reply@example.com".to_string());
        c.email.authorization_token = Some(Secret::new("test-token".to_string()));
        c.email.operator = "owner@example.com".to_string();
        c.email.timeout_milliseconds = 500;
        // Keep the limiter out of the way unless a test opts back in.
        c.rate_limit.max_requests = u32::MAX;

        customise(&mut c);
        c
    };
    let operator = settings.email.operator.clone();

    // Make OS choose a random port.
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind address");
    let address = format!("http://{}", listener.local_addr().expect("No local address"));

    let _ = tokio::spawn(App::serve(listener, settings));

    TestApp {
        address,
        email_server,
        operator,
        api_client: reqwest::Client::new(),
    }
}
