use chrono::{Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use std::collections::HashSet;

use crate::domain::models::appointment::{
    Appointment, AppointmentStatus, AppointmentType, SlotOption,
};
use crate::domain::models::availability::AvailabilityWindow;
use crate::domain::models::user::{ProviderType, User};

pub const SLOT_MINUTES: i64 = 30;

const BOOKED_KEY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Computes the bookable slots for one provider on one date, from the
/// provider's weekly windows minus already-booked starts. Pure: slots are
/// derived on every call, never stored.
///
/// Starts are enumerated at 30-minute steps from each window's start while
/// `start + 30min <= end` (partial trailing slots are dropped). Booked
/// starts are matched at minute granularity, seconds ignored. Overlapping
/// windows may cover the same start; duplicates are emitted once.
/// Output order is unspecified; the query layer sorts.
pub fn calculate_slots(
    provider: &User,
    date: NaiveDate,
    windows: &[AvailabilityWindow],
    bookings: &[Appointment],
) -> Vec<SlotOption> {
    let day_of_week = date.weekday().num_days_from_sunday() as i64;

    let booked: HashSet<String> = bookings
        .iter()
        .filter(|a| a.status == AppointmentStatus::Scheduled && a.scheduled_at.date_naive() == date)
        .map(|a| a.scheduled_at.format(BOOKED_KEY_FORMAT).to_string())
        .collect();

    let mut seen = HashSet::new();
    let mut slots = Vec::new();

    for window in windows.iter().filter(|w| w.day_of_week == day_of_week) {
        if let (Ok(start), Ok(end)) = (
            NaiveTime::parse_from_str(&window.start_time, "%H:%M"),
            NaiveTime::parse_from_str(&window.end_time, "%H:%M"),
        ) {
            let start_idx = (start.hour() * 60 + start.minute()) as i64;
            let end_idx = (end.hour() * 60 + end.minute()) as i64;

            let mut cursor = start_idx;
            while cursor + SLOT_MINUTES <= end_idx {
                if let Some(time) =
                    NaiveTime::from_hms_opt((cursor / 60) as u32, (cursor % 60) as u32, 0)
                {
                    let slot_start = Utc.from_utc_datetime(&date.and_time(time));
                    let key = slot_start.format(BOOKED_KEY_FORMAT).to_string();

                    if !booked.contains(&key) && seen.insert(key) {
                        slots.push(SlotOption {
                            start: slot_start,
                            end: slot_start + Duration::minutes(SLOT_MINUTES),
                            counselor_id: provider.id,
                            counselor_username: provider.username.clone(),
                        });
                    }
                }
                cursor += SLOT_MINUTES;
            }
        }
    }

    slots
}

/// Appointment-type to provider-type mapping: `doctor` selects doctors
/// only, `counseling` excludes doctors, `follow_up` or no type matches any
/// provider.
pub fn provider_matches_type(provider: &User, requested: Option<AppointmentType>) -> bool {
    match requested {
        Some(AppointmentType::Doctor) => provider.provider_type == Some(ProviderType::Doctor),
        Some(AppointmentType::Counseling) => provider.provider_type != Some(ProviderType::Doctor),
        Some(AppointmentType::FollowUp) | None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::Role;
    use chrono::DateTime;

    fn provider(id: i64, provider_type: ProviderType) -> User {
        User {
            id,
            username: format!("provider{}", id),
            role: Role::Counselor,
            provider_type: Some(provider_type),
            created_at: Utc::now(),
        }
    }

    fn window(day_of_week: i64, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow {
            id: 0,
            counselor_id: 1,
            day_of_week,
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    fn booking(at: &str, status: AppointmentStatus) -> Appointment {
        let scheduled_at = DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc);
        Appointment {
            id: 0,
            student_id: 10,
            assigned_to: Some(1),
            scheduled_at,
            kind: AppointmentType::Counseling,
            status,
            location: None,
            provider_or_notes: None,
            admin_notes: None,
            counselor_report: None,
            created_by: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // 2026-08-23 is a Sunday, so day_of_week 0 matches it.
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn one_hour_window_yields_two_slots() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "10:00")], &[]);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
        assert_eq!(slots[0].end.format("%H:%M").to_string(), "09:30");
        assert_eq!(slots[1].start.format("%H:%M").to_string(), "09:30");
        assert_eq!(slots[1].end.format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn window_narrower_than_slot_yields_nothing() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "09:20")], &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn partial_trailing_slot_is_dropped() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "09:50")], &[]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn window_on_other_day_is_ignored() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(1, "09:00", "10:00")], &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn booked_start_is_excluded() {
        let p = provider(1, ProviderType::Counselor);
        let booked = booking("2026-08-23T09:00:00Z", AppointmentStatus::Scheduled);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "10:00")], &[booked]);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn booked_start_matches_at_minute_granularity() {
        let p = provider(1, ProviderType::Counselor);
        let booked = booking("2026-08-23T09:00:42Z", AppointmentStatus::Scheduled);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "10:00")], &[booked]);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start.format("%H:%M").to_string(), "09:30");
    }

    #[test]
    fn cancelled_booking_does_not_consume_a_slot() {
        let p = provider(1, ProviderType::Counselor);
        let cancelled = booking("2026-08-23T09:00:00Z", AppointmentStatus::Cancelled);
        let slots = calculate_slots(&p, sunday(), &[window(0, "09:00", "10:00")], &[cancelled]);
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn overlapping_windows_emit_each_start_once() {
        let p = provider(1, ProviderType::Counselor);
        let windows = [window(0, "09:00", "10:00"), window(0, "09:30", "10:30")];
        let slots = calculate_slots(&p, sunday(), &windows, &[]);

        let starts: Vec<String> = slots
            .iter()
            .map(|s| s.start.format("%H:%M").to_string())
            .collect();
        assert_eq!(starts, vec!["09:00", "09:30", "10:00"]);
    }

    #[test]
    fn inverted_window_yields_nothing() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(0, "12:00", "09:00")], &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn unparseable_times_are_skipped() {
        let p = provider(1, ProviderType::Counselor);
        let slots = calculate_slots(&p, sunday(), &[window(0, "late", "later")], &[]);
        assert!(slots.is_empty());
    }

    #[test]
    fn type_filter_matrix() {
        let counselor = provider(1, ProviderType::Counselor);
        let doctor = provider(2, ProviderType::Doctor);

        assert!(!provider_matches_type(&counselor, Some(AppointmentType::Doctor)));
        assert!(provider_matches_type(&doctor, Some(AppointmentType::Doctor)));
        assert!(provider_matches_type(&counselor, Some(AppointmentType::Counseling)));
        assert!(!provider_matches_type(&doctor, Some(AppointmentType::Counseling)));
        assert!(provider_matches_type(&counselor, Some(AppointmentType::FollowUp)));
        assert!(provider_matches_type(&doctor, Some(AppointmentType::FollowUp)));
        assert!(provider_matches_type(&counselor, None));
        assert!(provider_matches_type(&doctor, None));
    }
}
