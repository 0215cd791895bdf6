pub mod sqlite_appointment_repo;
pub mod sqlite_availability_repo;
pub mod sqlite_user_repo;
