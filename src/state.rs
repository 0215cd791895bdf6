use std::sync::Arc;
use crate::domain::ports::{
    AppointmentRepository, AvailabilityRepository, NotificationService, UserRepository,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub notifier: Arc<dyn NotificationService>,
}
