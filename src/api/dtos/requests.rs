use crate::domain::models::appointment::AppointmentType;
use serde::{Deserialize, Deserializer};

/// Distinguishes an omitted field (preserve) from an explicit `null`
/// (clear) in merge-patch bodies.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Raw window as submitted by the client. Rows with a day outside [0,6]
/// or missing times are silently dropped, not rejected.
#[derive(Deserialize)]
pub struct AvailabilityWindowInput {
    pub day_of_week: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplaceAvailabilityRequest {
    pub availability: Vec<AvailabilityWindowInput>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub student_id: Option<i64>,
    pub scheduled_at: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AppointmentType>,
    pub location: Option<String>,
    pub provider_or_notes: Option<String>,
    pub admin_notes: Option<String>,
    pub assigned_to: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub status: Option<String>,
    pub scheduled_at: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub counselor_report: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<i64>>,
}
