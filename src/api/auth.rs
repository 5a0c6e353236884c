use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned after login; the access token is retained by the client and
/// attached to subsequent requests.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub username: String,
    pub email: String,
}

/// Public part of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub username: String,
    pub email: String,
}

impl ApiClient {
    pub async fn login(&self, req: &LoginRequest) -> AppResult<AuthResponse> {
        let resp: AuthResponse = self.post_json("/auth/login", req).await?;
        self.set_token(resp.access_token.clone());
        Ok(resp)
    }

    /// Registers and then logs straight in, as the signup form does.
    pub async fn register(&self, req: &RegisterRequest) -> AppResult<AuthResponse> {
        let _: serde_json::Value = self.post_json("/auth/register", req).await?;
        self.login(&LoginRequest {
            email: req.email.clone(),
            password: req.password.clone(),
        })
        .await
    }

    pub async fn me(&self) -> AppResult<PublicUser> {
        self.get_json("/auth/me").await
    }

    pub fn logout(&self) {
        self.clear_token();
    }
}
