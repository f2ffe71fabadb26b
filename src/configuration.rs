use config::{Config, File, FileFormat};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;
use url::Url;

/// Retrieve the configuration for the application.
///
/// Values come from `configuration.yaml`, overridable through `APP_`-prefixed
/// environment variables (`APP_APPLICATION__PORT`, `APP_EMAIL__SENDER`, ...).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    Config::builder()
        .add_source(File::new("configuration.yaml", FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email: EmailSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub environment: Environment,
    pub cors_origin: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Mail transport settings. `sender` and `authorization_token` are the two
/// credential values the relay requires per delivery; they are optional here
/// so that a misconfigured deployment starts up and fails closed on delivery
/// instead of at boot.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailSettings {
    pub base_url: String,
    pub sender: Option<String>,
    pub authorization_token: Option<Secret<String>>,
    pub operator: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailSettings {
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RateLimitSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub window_seconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_requests: u32,
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }
}

/// The runtime mode the application is deployed in. Controls how much error
/// detail the outermost error handler exposes to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}
