use crate::domain::models::user::Role;
use crate::error::AppError;

/// Operations gated by role. Ownership checks (own appointment, own
/// assignment) stay with the lifecycle code; this table answers only
/// whether a role may attempt the operation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadAvailability,
    WriteAvailability,
    QuerySlots,
    CreateAppointment,
    ListAppointments,
    UpdateAppointment,
    DeleteAppointment,
}

pub fn allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ReadAvailability | Action::WriteAvailability => role == Role::Counselor,
        Action::QuerySlots => true,
        // Admins see aggregate statistics only, never individual bookings.
        Action::CreateAppointment | Action::ListAppointments | Action::UpdateAppointment => {
            matches!(role, Role::Student | Role::Counselor)
        }
        Action::DeleteAppointment => role == Role::Counselor,
    }
}

pub fn require(role: Role, action: Action) -> Result<(), AppError> {
    if allowed(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Role is not permitted to perform {:?}",
            action
        )))
    }
}
