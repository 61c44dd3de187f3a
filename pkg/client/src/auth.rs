use pkg_types::auth::{AuthUser, LoginRequest, LoginResponse};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `POST /auth/login`. Needs no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!("Signing in as {} at {}", email, self.base_url());
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/auth/login", &body).await
    }

    /// `GET /auth/me`: profile of the token's owner.
    pub async fn me(&self) -> Result<AuthUser, ApiError> {
        self.get("/auth/me").await
    }
}
