pub mod appointment;
pub mod auth;
pub mod availability;
pub mod user;
