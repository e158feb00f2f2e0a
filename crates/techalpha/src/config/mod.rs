use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_DATABASE: &str = "techalpha";
const DEFAULT_SENDER_NAME: &str = "TechAlpha Hub";
const DEFAULT_PAYSTACK_BASE_URL: &str = "https://api.paystack.co";
const DEFAULT_PAYSTACK_TIMEOUT_SECS: u64 = 30;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
    pub payments: PaymentConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => parse_port(&raw, "APP_PORT")?,
            Err(_) => DEFAULT_PORT,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let database = DatabaseConfig {
            uri: Secret(required("MONGO_URI")?),
            name: optional("MONGO_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        let username = required("EMAIL_USER")?;
        let smtp = SmtpConfig {
            host: required("SMTP_HOST")?,
            port: match optional("SMTP_PORT") {
                Some(raw) => parse_port(&raw, "SMTP_PORT")?,
                None => DEFAULT_SMTP_PORT,
            },
            password: Secret(required("EMAIL_PASS")?),
            sender_name: optional("EMAIL_FROM_NAME")
                .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
            notify_address: optional("NOTIFY_EMAIL").unwrap_or_else(|| username.clone()),
            username,
        };

        let payments = PaymentConfig {
            secret_key: Secret(required("PAYSTACK_SECRET_KEY")?),
            base_url: optional("PAYSTACK_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PAYSTACK_BASE_URL.to_string()),
            callback_url: optional("PAYSTACK_CALLBACK_URL"),
            timeout: match optional("PAYSTACK_TIMEOUT_SECS") {
                Some(raw) => parse_timeout(&raw, "PAYSTACK_TIMEOUT_SECS")?,
                None => Duration::from_secs(DEFAULT_PAYSTACK_TIMEOUT_SECS),
            },
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            database,
            smtp,
            payments,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn parse_port(raw: &str, key: &'static str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(key))
}

fn parse_timeout(raw: &str, key: &'static str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(key)),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Document store connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub uri: Secret,
    pub name: String,
}

/// SMTP relay settings; the username doubles as the sender address.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret,
    pub sender_name: String,
    pub notify_address: String,
}

/// Payment gateway credentials and endpoints.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub secret_key: Secret,
    pub base_url: String,
    pub callback_url: Option<String>,
    /// Upper bound on a single gateway call, connection included.
    pub timeout: Duration,
}

/// String wrapper that never prints its contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    InvalidPort(&'static str),
    InvalidTimeout(&'static str),
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::InvalidPort(key) => write!(f, "{key} must be a valid u16"),
            ConfigError::InvalidTimeout(key) => {
                write!(f, "{key} must be a positive number of seconds")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Missing(_)
            | ConfigError::InvalidPort(_)
            | ConfigError::InvalidTimeout(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
