use axum::{extract::{Query, State}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::{SlotDatesResponse, SlotsResponse};
use crate::domain::models::appointment::{AppointmentType, SlotOption};
use crate::domain::models::user::{Role, User};
use crate::domain::services::policy::{self, Action};
use crate::domain::services::slots::{calculate_slots, provider_matches_type};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};

struct SlotQuery {
    counselor_id: Option<i64>,
    kind: Option<AppointmentType>,
}

fn parse_slot_query(params: &HashMap<String, String>) -> Result<SlotQuery, AppError> {
    let counselor_id = params.get("counselorId")
        .map(|raw| raw.parse::<i64>().map_err(|_| AppError::Validation("Invalid counselorId".into())))
        .transpose()?;

    let kind = params.get("type")
        .map(|raw| AppointmentType::parse(raw).ok_or(AppError::Validation("Invalid type".into())))
        .transpose()?;

    Ok(SlotQuery { counselor_id, kind })
}

/// Fans the slot generator out across the candidate provider set and
/// merges the results into one ascending list.
async fn collect_slots(
    state: &AppState,
    date: NaiveDate,
    query: &SlotQuery,
) -> Result<Vec<SlotOption>, AppError> {
    let candidates: Vec<User> = match query.counselor_id {
        Some(id) => state.user_repo.find_by_id(id).await?
            .filter(|u| u.role == Role::Counselor)
            .map(|u| vec![u])
            .unwrap_or_default(),
        None => state.user_repo.list_counselors().await?,
    };

    let day_start = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
    let day_end = day_start + Duration::days(1);

    let mut slots = Vec::new();
    for provider in candidates.iter().filter(|p| provider_matches_type(p, query.kind)) {
        let windows = state.availability_repo.get(provider.id).await?;
        let booked = state.appointment_repo
            .list_scheduled_for_day(provider.id, day_start, day_end)
            .await?;
        slots.extend(calculate_slots(provider, date, &windows, &booked));
    }

    // Stable: ties keep provider iteration order.
    slots.sort_by_key(|s| s.start);
    Ok(slots)
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::QuerySlots)?;

    let date_str = params.get("date").ok_or(AppError::Validation("date is required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (expected YYYY-MM-DD)".into()))?;

    let query = parse_slot_query(&params)?;
    let slots = collect_slots(&state, date, &query).await?;

    Ok(Json(SlotsResponse { slots }))
}

pub async fn get_slot_dates(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::QuerySlots)?;

    let month_str = params.get("month").ok_or(AppError::Validation("month is required".into()))?;
    let first = NaiveDate::parse_from_str(&format!("{}-01", month_str), "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid month format (expected YYYY-MM)".into()))?;

    let query = parse_slot_query(&params)?;

    // Brute-force per-day probe over the month.
    let mut dates = Vec::new();
    let mut current = first;
    while current.month() == first.month() {
        let slots = collect_slots(&state, current, &query).await?;
        if !slots.is_empty() {
            dates.push(current.to_string());
        }
        current += Duration::days(1);
    }

    Ok(Json(SlotDatesResponse { dates }))
}
