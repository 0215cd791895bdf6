use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    Counselor,
}

/// Only meaningful for `Role::Counselor`; doctors are providers with
/// `provider_type = doctor`.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum ProviderType {
    Counselor,
    Doctor,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub provider_type: Option<ProviderType>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUser {
    pub username: String,
    pub role: Role,
    pub provider_type: Option<ProviderType>,
}
