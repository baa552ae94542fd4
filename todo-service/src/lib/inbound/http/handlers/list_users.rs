use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::get_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pagination::Page;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Page::new(params.limit, params.offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListData {
    pub users: Vec<UserData>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<UserListData>, ApiError> {
    let users = state.user_service.list_users(params.into()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserListData {
            users: users.iter().map(UserData::from).collect(),
        },
    ))
}
