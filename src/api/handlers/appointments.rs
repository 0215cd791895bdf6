use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::domain::models::appointment::{
    AppointmentFilter, AppointmentStatus, AppointmentType, NewAppointment,
};
use crate::domain::models::user::Role;
use crate::domain::services::notify;
use crate::domain::services::policy::{self, Action};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{info, warn};

const LIST_LIMIT: i64 = 200;

fn parse_scheduled_at(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(AppError::Validation("Invalid scheduledAt format".into()))
}

fn parse_range_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
        if let Some(naive) = date.and_hms_opt(time.0, time.1, time.2) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(AppError::Validation("Invalid date range bound".into()))
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::CreateAppointment)?;

    // Students book for themselves; counselors must name the student.
    let student_id = if user.role == Role::Student {
        user.id
    } else {
        payload.student_id
            .ok_or(AppError::Validation("studentId is required".into()))?
    };

    let scheduled_at_raw = payload.scheduled_at
        .ok_or(AppError::Validation("scheduledAt is required".into()))?;
    let scheduled_at = parse_scheduled_at(&scheduled_at_raw)?;

    state.user_repo.find_by_id(student_id).await?
        .filter(|u| u.role == Role::Student)
        .ok_or(AppError::NotFound("Student not found".into()))?;

    // An assignedTo outside the current counselor list is dropped to
    // unassigned, not rejected.
    let counselors = state.user_repo.list_counselors().await?;
    let assigned_to = payload.assigned_to
        .filter(|id| counselors.iter().any(|c| c.id == *id));

    let new_appointment = NewAppointment {
        student_id,
        assigned_to,
        scheduled_at,
        kind: payload.kind.unwrap_or(AppointmentType::Counseling),
        location: payload.location,
        provider_or_notes: payload.provider_or_notes,
        admin_notes: payload.admin_notes,
        created_by: user.id,
    };

    let created = state.appointment_repo.create(&new_appointment).await?;
    info!("Appointment created: {} for student {}", created.id, created.student_id);

    let provider_name = created.assigned_to
        .and_then(|id| counselors.iter().find(|c| c.id == id))
        .map(|c| c.username.clone());
    let message = notify::booking_summary(&created, provider_name.as_deref());
    if let Err(e) = state.notifier.notify(created.student_id, &message).await {
        warn!("Booking notification failed for appointment {}: {:?}", created.id, e);
    }

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "appointment": created }))))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::ListAppointments)?;

    let status = params.get("status")
        .map(|raw| AppointmentStatus::parse(raw).ok_or(AppError::Validation("Invalid status".into())))
        .transpose()?;
    let from = params.get("from")
        .map(|raw| parse_range_bound(raw, false))
        .transpose()?;
    let to = params.get("to")
        .map(|raw| parse_range_bound(raw, true))
        .transpose()?;
    let student_param = params.get("studentId")
        .map(|raw| raw.parse::<i64>().map_err(|_| AppError::Validation("Invalid studentId".into())))
        .transpose()?;

    let mut filter = AppointmentFilter {
        status,
        from,
        to,
        limit: LIST_LIMIT,
        ..Default::default()
    };

    match user.role {
        // A student only ever sees their own rows, whatever the params say.
        Role::Student => filter.student_id = Some(user.id),
        // A counselor sees their own bookings plus unassigned requests,
        // never another counselor's assignments.
        Role::Counselor => {
            filter.assigned_to_or_unassigned = Some(user.id);
            filter.student_id = student_param;
        }
        Role::Admin => return Err(AppError::Forbidden("Admins cannot view appointments".into())),
    }

    let appointments = state.appointment_repo.list(&filter).await?;
    Ok(Json(serde_json::json!({ "appointments": appointments })))
}

pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::UpdateAppointment)?;

    let mut appointment = state.appointment_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    let new_status = payload.status.as_deref()
        .map(|raw| AppointmentStatus::parse(raw).ok_or(AppError::Validation("Invalid status".into())))
        .transpose()?;
    let new_scheduled_at = payload.scheduled_at.as_deref()
        .map(parse_scheduled_at)
        .transpose()?;

    let previous_status = appointment.status;

    match user.role {
        Role::Counselor => {
            // Claim-or-self-manage: untouchable once another counselor
            // holds the assignment.
            if appointment.assigned_to.is_some() && appointment.assigned_to != Some(user.id) {
                return Err(AppError::Forbidden(
                    "Appointment is assigned to another counselor".into(),
                ));
            }
            if let Some(status) = new_status {
                appointment.status = status;
            }
            if let Some(scheduled_at) = new_scheduled_at {
                appointment.scheduled_at = scheduled_at;
            }
            if let Some(report) = payload.counselor_report {
                appointment.counselor_report = report.map(notify::truncate_report);
            }
            if let Some(assigned_to) = payload.assigned_to {
                appointment.assigned_to = assigned_to;
            }
        }
        Role::Student => {
            if appointment.student_id != user.id {
                return Err(AppError::Forbidden("Not your appointment".into()));
            }
            if appointment.status != AppointmentStatus::Scheduled {
                return Err(AppError::Conflict("Appointment is no longer scheduled".into()));
            }
            if payload.counselor_report.is_some() || payload.assigned_to.is_some() {
                return Err(AppError::Forbidden("Field not permitted for students".into()));
            }
            if let Some(status) = new_status {
                if status != AppointmentStatus::Cancelled {
                    return Err(AppError::Forbidden("Students may only cancel".into()));
                }
                appointment.status = AppointmentStatus::Cancelled;
            }
            if let Some(scheduled_at) = new_scheduled_at {
                appointment.scheduled_at = scheduled_at;
            }
        }
        Role::Admin => return Err(AppError::Forbidden("Admins cannot modify appointments".into())),
    }

    appointment.updated_at = Utc::now();
    let updated = state.appointment_repo.update(&appointment).await?;
    info!("Appointment updated: {}", updated.id);

    let finalized = matches!(
        updated.status,
        AppointmentStatus::Completed | AppointmentStatus::NoShow
    );
    if user.role == Role::Counselor && finalized && previous_status != updated.status {
        let message = notify::outcome_summary(&updated);
        if let Err(e) = state.notifier.notify(updated.student_id, &message).await {
            warn!("Outcome notification failed for appointment {}: {:?}", updated.id, e);
        }
    }

    Ok(Json(serde_json::json!({ "appointment": updated })))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    policy::require(user.role, Action::DeleteAppointment)?;

    let appointment = state.appointment_repo.find_by_id(id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    if appointment.assigned_to != Some(user.id) {
        return Err(AppError::Forbidden(
            "Only the assigned counselor may delete an appointment".into(),
        ));
    }

    // Hard delete, deliberately without a notification.
    state.appointment_repo.delete(id).await?;
    info!("Appointment deleted: {}", id);

    Ok(StatusCode::NO_CONTENT)
}
