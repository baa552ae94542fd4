use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::create_todo::TodoData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::pagination::Page;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::SearchTerm;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoState;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TodoQuery {
    fn try_into_filter(self) -> Result<TodoFilter, TodoError> {
        Ok(TodoFilter {
            title: search_term(self.title)?,
            description: search_term(self.description)?,
            state: self.state.map(|s| s.parse::<TodoState>()).transpose()?,
            page: Page::new(self.limit, self.offset),
        })
    }
}

/// An empty query value means the filter is unset.
fn search_term(value: Option<String>) -> Result<Option<SearchTerm>, TodoError> {
    Ok(value
        .filter(|v| !v.is_empty())
        .map(SearchTerm::new)
        .transpose()?)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoListData {
    pub todos: Vec<TodoData>,
}

pub async fn list_todos(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<TodoQuery>,
) -> Result<ApiSuccess<TodoListData>, ApiError> {
    let todos = state
        .todo_service
        .list_todos(&user.id, query.try_into_filter()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TodoListData {
            todos: todos.iter().map(TodoData::from).collect(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_filters_ignored() {
        let query = TodoQuery {
            title: Some(String::new()),
            state: Some("done".to_string()),
            limit: Some(500),
            ..Default::default()
        };
        let filter = query.try_into_filter().unwrap();

        assert!(filter.title.is_none());
        assert_eq!(filter.state, Some(TodoState::Done));
        assert_eq!(filter.page.limit(), Page::MAX_LIMIT);
    }

    #[test]
    fn test_search_term_length_bounds() {
        let too_short = TodoQuery {
            title: Some("a".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            too_short.try_into_filter(),
            Err(TodoError::InvalidFilter(_))
        ));

        let too_long = TodoQuery {
            description: Some("a".repeat(22)),
            ..Default::default()
        };
        assert!(matches!(
            too_long.try_into_filter(),
            Err(TodoError::InvalidFilter(_))
        ));
    }
}
