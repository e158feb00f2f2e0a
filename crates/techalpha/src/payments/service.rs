use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use crate::submissions::validation::{present, Required, ValidationError};

use super::domain::{to_minor_units, PaymentInitiation, PaymentRequest, VerificationRequest};
use super::gateway::{GatewayError, PaymentGateway};

/// Thin proxy in front of the payment gateway: validate, forward, hand back the raw response.
pub struct PaymentService<G> {
    gateway: Arc<G>,
    default_callback_url: Option<String>,
}

impl<G> PaymentService<G>
where
    G: PaymentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, default_callback_url: Option<String>) -> Self {
        Self {
            gateway,
            default_callback_url,
        }
    }

    pub async fn initiate(&self, request: PaymentRequest) -> Result<Value, PaymentError> {
        let mut required = Required::default();
        let amount = required.check("amount", request.amount);
        let email = required.take("email", request.email);
        let phone = required.take("phone", request.phone);
        let amount = required.finish_with(amount)?;

        let amount_minor = to_minor_units(amount).ok_or(PaymentError::InvalidAmount(amount))?;

        let initiation = PaymentInitiation {
            amount_minor,
            email,
            phone,
            name: present(request.name),
            callback_url: present(request.callback_url)
                .or_else(|| self.default_callback_url.clone()),
        };

        let response = self.gateway.initialize(initiation).await?;
        info!(amount_minor, "payment initialized");
        Ok(response)
    }

    pub async fn verify(&self, request: VerificationRequest) -> Result<Value, PaymentError> {
        let mut required = Required::default();
        let reference = required.take("reference", request.reference);
        required.finish()?;

        let response = self.gateway.verify(&reference).await?;
        info!(%reference, "payment verification forwarded");
        Ok(response)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
