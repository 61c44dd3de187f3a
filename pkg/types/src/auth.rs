use serde::{Deserialize, Serialize};

use crate::role::Role;

// --- Login exchange ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: AuthUser,
}

// --- Signed-in user profile (`/auth/me`) ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Role exactly as the backend sent it.
    #[serde(default)]
    pub role: String,
}

impl AuthUser {
    pub fn parsed_role(&self) -> Role {
        Role::parse(&self.role)
    }
}
