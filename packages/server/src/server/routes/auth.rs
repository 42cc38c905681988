use axum::{extract::Extension, Json};

use crate::common::ApiResult;
use crate::domains::auth::{LoginRequest, LoginResponse};
use crate::server::app::AxumAppState;

/// POST /auth/login
///
/// Exchanges email + password for a bearer token.
pub async fn login_handler(
    Extension(state): Extension<AxumAppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}
