use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const INVALID_LOGIN_MESSAGE: &str = "Incorrect email or password";

/// Exchange email and password for a bearer token.
///
/// Unknown email and wrong password produce the same 401.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequestForm>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let user = match state.user_service.get_user_by_email(&form.username).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            tracing::debug!("Login attempt for unknown email");
            let error = state.authenticator.reject_unknown_account(&form.password);
            return Err(login_error(error));
        }
        Err(e) => return Err(e.into()),
    };

    let result = state
        .authenticator
        .login(
            &form.password,
            &user.password_hash,
            auth::Claims::new(user.email.as_str()),
        )
        .map_err(|e| {
            if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            }
            login_error(e)
        })?;

    tracing::info!(user_id = %user.id, "Issued access token");
    Ok(ApiSuccess::new(StatusCode::OK, result.into()))
}

fn login_error(error: auth::AuthenticationError) -> ApiError {
    match error {
        auth::AuthenticationError::InvalidCredentials => {
            ApiError::Unauthorized(INVALID_LOGIN_MESSAGE.to_string())
        }
        auth::AuthenticationError::PasswordError(err) => {
            ApiError::InternalServerError(format!("Password verification failed: {}", err))
        }
        auth::AuthenticationError::JwtError(err) => {
            ApiError::InternalServerError(format!("Token generation failed: {}", err))
        }
    }
}

/// OAuth2 password-grant style form; `username` carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<auth::AuthenticationResult> for TokenData {
    fn from(result: auth::AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type.to_string(),
            expires_at: result.expires_at,
        }
    }
}
