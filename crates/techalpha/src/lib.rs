//! TechAlpha Hub site backend: form intake with confirmation mail, and a payment gateway proxy.

pub mod config;
pub mod error;
pub mod payments;
pub mod responses;
pub mod submissions;
pub mod telemetry;
