//! Login flow: credential check and token issuance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::auth::jwt::JwtService;
use crate::domains::auth::models::User;
use crate::domains::auth::password::verify_password;

/// Credentials submitted to the login endpoint.
#[derive(Debug, Deserialize, juniper::GraphQLInputObject)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The authenticated user echoed back in login responses.
#[derive(Debug, Clone, Serialize, juniper::GraphQLObject)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, juniper::GraphQLObject)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i32,
    pub user: AuthenticatedUser,
}

pub struct AuthService {
    pool: PgPool,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtService>) -> Self {
        Self { pool, jwt }
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown email and wrong password produce the same response so
    /// the endpoint cannot be used to probe for registered addresses.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<LoginResponse> {
        let email = request.email.trim().to_lowercase();

        let user = User::find_by_email(&self.pool, &email)
            .await
            .map_err(ApiError::Internal)?;

        let Some(user) = user else {
            debug!(email = %email, "Login attempt for unknown email");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        };

        if !verify_password(&request.password, &user.password_hash) {
            debug!(email = %email, "Login attempt with wrong password");
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let access_token = self
            .jwt
            .create_token(user.id, &user.email)
            .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expires_in() as i32,
            user: AuthenticatedUser {
                id: user.id,
                email: user.email,
            },
        })
    }
}
