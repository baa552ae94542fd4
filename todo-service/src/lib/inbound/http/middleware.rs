use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Account resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the bearer token into an account and adds it to
/// request extensions.
///
/// Every rejection, whatever the cause, is the same 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = authorization_header(&req)?.to_owned();

    let user = state
        .identity
        .authenticate(&header)
        .await
        .map_err(|e| match e {
            auth::IdentityError::Unauthenticated => ApiError::invalid_token().into_response(),
            auth::IdentityError::Lookup(err) => {
                ApiError::InternalServerError(err.to_string()).into_response()
            }
        })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn authorization_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::invalid_token().into_response()
        })?;

    header.to_str().map_err(|_| {
        tracing::debug!("Authorization header is not valid ASCII");
        ApiError::invalid_token().into_response()
    })
}
