use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A recurring weekly open window for one provider. Times are wall-clock
/// "HH:MM" strings; `day_of_week` uses 0 = Sunday.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityWindow {
    pub id: i64,
    pub counselor_id: i64,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}

pub struct NewAvailabilityWindow {
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}
