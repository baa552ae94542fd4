use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::create_todo::TodoData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoState;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Partial update body; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
}

impl UpdateTodoRequest {
    fn try_into_command(self) -> Result<UpdateTodoCommand, TodoError> {
        Ok(UpdateTodoCommand {
            title: self.title.map(TodoTitle::new).transpose()?,
            description: self.description,
            state: self.state.map(|s| s.parse::<TodoState>()).transpose()?,
        })
    }
}

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::from_string(&id).map_err(TodoError::from)?;
    let command = req.try_into_command()?;

    state
        .todo_service
        .update_todo(&user.id, &todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
