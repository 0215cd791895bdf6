use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AppointmentType {
    Counseling,
    Doctor,
    FollowUp,
}

impl AppointmentType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "counseling" => Some(Self::Counseling),
            "doctor" => Some(Self::Doctor),
            "follow_up" => Some(Self::FollowUp),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Counseling => "counseling",
            Self::Doctor => "doctor",
            Self::FollowUp => "follow-up",
        }
    }
}

/// `scheduled` is the sole entry state; the other three are terminal.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: i64,
    pub student_id: i64,
    pub assigned_to: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: AppointmentType,
    pub status: AppointmentStatus,
    pub location: Option<String>,
    pub provider_or_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub counselor_report: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewAppointment {
    pub student_id: i64,
    pub assigned_to: Option<i64>,
    pub scheduled_at: DateTime<Utc>,
    pub kind: AppointmentType,
    pub location: Option<String>,
    pub provider_or_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub created_by: i64,
}

/// Filters for listing appointments. `assigned_to_or_unassigned` matches
/// rows assigned to the given provider OR not assigned at all, so a
/// counselor sees both their own bookings and open requests to claim.
#[derive(Default)]
pub struct AppointmentFilter {
    pub student_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub assigned_to_or_unassigned: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: i64,
}

/// A bookable slot, derived from availability windows and existing
/// bookings on every query. Never persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotOption {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub counselor_id: i64,
    pub counselor_username: String,
}
