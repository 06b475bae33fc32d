use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_id: Uuid,
    pub amount_cents: i64,
    /// Free-form label such as `card` or `cash`.
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    #[validate(range(exclusive_min = 0.0, max = 1_000_000.0, message = "amount must be positive and at most 1000000"))]
    pub amount: f64,
    #[validate(length(min = 1, max = 50, message = "method is required"))]
    pub method: String,
}

/// Converts a decimal amount from the wire into cents, rounding to the nearest cent.
pub fn cents_from_decimal(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn decimal_from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}
