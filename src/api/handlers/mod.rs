pub mod appointments;
pub mod availability;
pub mod health;
pub mod slots;
