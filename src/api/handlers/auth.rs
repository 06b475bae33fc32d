use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::{extract::ValidatedJson, state::AppState},
    domain::{AuthSession, LoginRequest, RegisterRequest},
    error::Result,
};

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSession>)> {
    let session = state.service_context.user_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthSession>> {
    let session = state.service_context.user_service.login(request).await?;
    Ok(Json(session))
}
