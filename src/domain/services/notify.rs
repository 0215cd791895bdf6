use crate::domain::models::appointment::{Appointment, AppointmentStatus};

pub const REPORT_MAX_CHARS: usize = 4000;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Human-readable confirmation sent to the student when a booking is
/// created. Optional parts are appended only when present.
pub fn booking_summary(appointment: &Appointment, provider_name: Option<&str>) -> String {
    let mut message = format!(
        "Your {} appointment is scheduled for {}.",
        appointment.kind.label(),
        appointment.scheduled_at.format(TIMESTAMP_FORMAT)
    );

    if let Some(location) = &appointment.location {
        message.push_str(&format!(" Location: {}.", location));
    }
    if let Some(name) = provider_name {
        message.push_str(&format!(" Provider: {}.", name));
    }
    if let Some(notes) = &appointment.provider_or_notes {
        message.push_str(&format!(" Notes: {}.", notes));
    }

    message
}

/// Outcome message sent when a counselor finalizes an appointment as
/// completed or no-show. Includes the counselor's report when present.
pub fn outcome_summary(appointment: &Appointment) -> String {
    let outcome = match appointment.status {
        AppointmentStatus::Completed => "marked as completed",
        AppointmentStatus::NoShow => "recorded as a no-show",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::Scheduled => "updated",
    };

    let mut message = format!(
        "Your {} appointment on {} was {}.",
        appointment.kind.label(),
        appointment.scheduled_at.format(TIMESTAMP_FORMAT),
        outcome
    );

    if let Some(report) = &appointment.counselor_report {
        message.push_str(&format!(" Report: {}", report));
    }

    message
}

pub fn truncate_report(report: String) -> String {
    if report.chars().count() <= REPORT_MAX_CHARS {
        report
    } else {
        report.chars().take(REPORT_MAX_CHARS).collect()
    }
}
