use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    api::{extract::{PathParam, ValidatedJson}, middleware::auth::CurrentUser, state::AppState},
    domain::{Booking, CreateBookingRequest},
    error::{AppError, Result},
};

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    // An unknown class is a bad reference in the body, not a missing resource
    let booking = state.service_context.booking_service
        .create_booking(current_user.user_id, request.class_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(msg) => AppError::BadRequest(msg),
            other => other,
        })?;
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<Booking>>> {
    let bookings = state.service_context.booking_service
        .list_bookings(current_user.user_id)
        .await?;
    Ok(Json(bookings))
}

pub async fn cancel(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Booking>> {
    let booking = state.service_context.booking_service
        .cancel_booking(current_user.user_id, id)
        .await?;
    Ok(Json(booking))
}
