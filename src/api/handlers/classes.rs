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
    domain::{decimal_from_cents, CreateClassRequest, GymClass},
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct ClassDto {
    id: Uuid,
    name: String,
    description: String,
    trainer_id: Uuid,
    capacity: i32,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    price: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GymClass> for ClassDto {
    fn from(class: GymClass) -> Self {
        Self {
            id: class.id,
            name: class.name,
            description: class.description,
            trainer_id: class.trainer_id,
            capacity: class.capacity,
            start_time: class.start_time,
            end_time: class.end_time,
            price: decimal_from_cents(class.price_cents),
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ClassDto>>> {
    let classes = state.service_context.booking_service.list_classes().await?;
    Ok(Json(classes.into_iter().map(ClassDto::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<CreateClassRequest>,
) -> Result<(StatusCode, Json<ClassDto>)> {
    let class = state.service_context.booking_service
        .create_class(current_user.user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}
