use axum::{extract::State, Json};

use crate::{
    api::state::AppState,
    domain::DashboardReport,
    error::Result,
};

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardReport>> {
    let report = state.service_context.dashboard_service.get_dashboard().await?;
    Ok(Json(report))
}
