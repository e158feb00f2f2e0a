use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Checkout request from the site. `amount` is in major currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Option<Decimal>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "fullName")]
    pub name: Option<String>,
    #[serde(alias = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub reference: Option<String>,
}

/// Validated request forwarded to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInitiation {
    pub amount_minor: u64,
    pub email: String,
    pub phone: String,
    pub name: Option<String>,
    pub callback_url: Option<String>,
}

/// Convert a major-unit amount to minor units (x100), rounding half away from zero.
/// Returns `None` for amounts that round to zero, are negative, or overflow.
pub fn to_minor_units(amount: Decimal) -> Option<u64> {
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    minor.to_u64().filter(|value| *value > 0)
}
