use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api::{extract::ValidatedJson, middleware::auth::CurrentUser, state::AppState},
    domain::{decimal_from_cents, CreatePaymentRequest, Payment, PaymentStatus},
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    id: Uuid,
    user_id: Uuid,
    booking_id: Uuid,
    amount: f64,
    method: String,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            user_id: payment.user_id,
            booking_id: payment.booking_id,
            amount: decimal_from_cents(payment.amount_cents),
            method: payment.method,
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentDto>)> {
    let payment = state.service_context.payment_service
        .create_payment(current_user.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<PaymentDto>>> {
    let payments = state.service_context.payment_service
        .list_payments(current_user.user_id)
        .await?;
    Ok(Json(payments.into_iter().map(PaymentDto::from).collect()))
}
