use crate::domain::models::{
    appointment::{Appointment, AppointmentFilter, NewAppointment},
    availability::{AvailabilityWindow, NewAvailabilityWindow},
    user::{NewUser, User},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn list_counselors(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn get(&self, counselor_id: i64) -> Result<Vec<AvailabilityWindow>, AppError>;
    /// Replaces the provider's full window set: delete-all-then-insert in
    /// one transaction, last-writer-wins.
    async fn replace(
        &self,
        counselor_id: i64,
        windows: &[NewAvailabilityWindow],
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, AppError>;
    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError>;
    /// The provider's `scheduled` appointments with `scheduled_at` in
    /// `[day_start, day_end)`. Feeds the slot generator's booked set.
    async fn list_scheduled_for_day(
        &self,
        provider_id: i64,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify(&self, recipient_id: i64, message: &str) -> Result<(), AppError>;
}
