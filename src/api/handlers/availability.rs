use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::ReplaceAvailabilityRequest;
use crate::domain::models::availability::NewAvailabilityWindow;
use crate::domain::services::policy::{self, Action};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::ReadAvailability)?;

    let availability = state.availability_repo.get(user.id).await?;
    Ok(Json(serde_json::json!({ "availability": availability })))
}

pub async fn replace_availability(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<ReplaceAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::WriteAvailability)?;

    // Invalid rows are dropped, not rejected. start < end is not checked
    // here; the generator simply yields nothing for inverted windows.
    let windows: Vec<NewAvailabilityWindow> = payload
        .availability
        .into_iter()
        .filter_map(|w| {
            let day_of_week = w.day_of_week?;
            if !(0..=6).contains(&day_of_week) {
                return None;
            }
            let start_time = w.start_time.filter(|s| !s.is_empty())?;
            let end_time = w.end_time.filter(|s| !s.is_empty())?;
            Some(NewAvailabilityWindow {
                day_of_week,
                start_time,
                end_time,
            })
        })
        .collect();

    state.availability_repo.replace(user.id, &windows).await?;
    info!("Availability replaced for counselor {}: {} windows", user.id, windows.len());

    Ok(Json(serde_json::json!({ "ok": true })))
}
