//! Payment initiation and verification, proxied to the gateway.

pub mod domain;
pub mod gateway;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{to_minor_units, PaymentInitiation, PaymentRequest, VerificationRequest};
pub use gateway::{GatewayError, PaymentGateway, PaystackGateway};
pub use router::payment_router;
pub use service::{PaymentError, PaymentService};
