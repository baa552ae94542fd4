use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::issue_token::TokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Mint a fresh token for the account that presented a valid one.
pub async fn refresh_token(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let result = state
        .authenticator
        .generate_token(auth::Claims::new(user.email.as_str()))
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "Refreshed access token");
    Ok(ApiSuccess::new(StatusCode::OK, result.into()))
}
