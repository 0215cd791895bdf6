use serde::{Deserialize, Serialize};
use crate::domain::models::user::Role;

/// Bearer-token claims. Tokens are minted by the auth collaborator; this
/// service only verifies them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}
