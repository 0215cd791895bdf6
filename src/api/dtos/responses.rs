use crate::domain::models::appointment::SlotOption;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<SlotOption>,
}

#[derive(Serialize)]
pub struct SlotDatesResponse {
    pub dates: Vec<String>,
}
