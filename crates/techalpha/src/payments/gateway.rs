use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::{PaymentConfig, Secret};

use super::domain::PaymentInitiation;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound payment provider. Responses are returned as the provider's raw JSON.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(&self, initiation: PaymentInitiation) -> Result<Value, GatewayError>;
    async fn verify(&self, reference: &str) -> Result<Value, GatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid gateway configuration: {0}")]
    Config(String),
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("gateway returned a non-JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Paystack transaction API client.
#[derive(Clone)]
pub struct PaystackGateway {
    client: Client,
    base_url: Url,
    secret_key: Secret,
}

impl PaystackGateway {
    pub fn new(client: Client, config: &PaymentConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| GatewayError::Config(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            secret_key: config.secret_key.clone(),
        })
    }

    /// Builds a client bounded by `config.timeout`; a stalled gateway surfaces as `Transport`.
    pub fn from_config(config: &PaymentConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .build()
            .map_err(|err| GatewayError::Config(format!("http client: {err}")))?;
        Self::new(client, config)
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Config("base URL has no path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.secret_key.expose()))
            .map_err(|_| {
                GatewayError::Config("secret key is not a valid header value".to_string())
            })?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn read(response: reqwest::Response) -> Result<Value, GatewayError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for PaystackGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackGateway")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Request body for `POST /transaction/initialize`. Paystack documents `amount` as a string.
pub(crate) fn initialize_body(initiation: &PaymentInitiation) -> Value {
    let mut metadata = Map::new();
    metadata.insert("phone".to_string(), json!(initiation.phone));
    if let Some(name) = &initiation.name {
        metadata.insert("name".to_string(), json!(name));
    }

    let mut body = json!({
        "email": initiation.email,
        "amount": initiation.amount_minor.to_string(),
        "metadata": Value::Object(metadata),
    });
    if let Some(callback_url) = &initiation.callback_url {
        body["callback_url"] = json!(callback_url);
    }
    body
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(&self, initiation: PaymentInitiation) -> Result<Value, GatewayError> {
        let url = self.endpoint(&["transaction", "initialize"])?;
        debug!(%url, amount_minor = initiation.amount_minor, "initializing transaction");

        let response = self
            .client
            .post(url)
            .headers(self.headers()?)
            .json(&initialize_body(&initiation))
            .send()
            .await?;
        Self::read(response).await
    }

    async fn verify(&self, reference: &str) -> Result<Value, GatewayError> {
        let url = self.endpoint(&["transaction", "verify", reference])?;
        debug!(%url, "verifying transaction");

        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> PaymentConfig {
        PaymentConfig {
            secret_key: Secret::new("sk_test_abc"),
            base_url: base_url.to_string(),
            callback_url: None,
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn endpoint_encodes_reference_segment() {
        let gateway =
            PaystackGateway::from_config(&config("https://api.paystack.co")).expect("valid base");
        let url = gateway
            .endpoint(&["transaction", "verify", "ref/with space"])
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://api.paystack.co/transaction/verify/ref%2Fwith%20space"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let gateway =
            PaystackGateway::from_config(&config("http://127.0.0.1:9000/mock/")).expect("base");
        let url = gateway
            .endpoint(&["transaction", "initialize"])
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/mock/transaction/initialize"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            PaystackGateway::from_config(&config("mailto:payments@techalphahub.com")),
            Err(GatewayError::Config(_))
        ));
        assert!(matches!(
            PaystackGateway::from_config(&config("not a url")),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn initialize_body_carries_contact_metadata() {
        let body = initialize_body(&PaymentInitiation {
            amount_minor: 2_500_000,
            email: "ada@example.com".to_string(),
            phone: "+2348012345678".to_string(),
            name: Some("Ada Obi".to_string()),
            callback_url: Some("https://techalphahub.com/payment/done".to_string()),
        });

        assert_eq!(body["amount"], "2500000");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["metadata"]["phone"], "+2348012345678");
        assert_eq!(body["metadata"]["name"], "Ada Obi");
        assert_eq!(
            body["callback_url"],
            "https://techalphahub.com/payment/done"
        );
    }
}
