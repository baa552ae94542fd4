use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::pagination::Page;
use crate::domain::todo::errors::SearchTermError;
use crate::domain::todo::errors::StateError;
use crate::domain::todo::errors::TitleError;
use crate::domain::todo::errors::TodoIdError;
use crate::domain::user::models::UserId;

/// Task owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(pub i64);

impl TodoId {
    /// # Errors
    /// * `InvalidFormat` - Not an integer
    pub fn from_string(s: &str) -> Result<Self, TodoIdError> {
        s.parse::<i64>()
            .map(TodoId)
            .map_err(|_| TodoIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-blank title of at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    const MAX_LENGTH: usize = 255;

    pub fn new(title: String) -> Result<Self, TitleError> {
        if title.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Substring searched for in titles or descriptions, 3 to 20 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 20;

    pub fn new(term: String) -> Result<Self, SearchTermError> {
        let length = term.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(SearchTermError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(SearchTermError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(term))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoState {
    Draft,
    Todo,
    Doing,
    Done,
    Trash,
}

impl TodoState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoState::Draft => "draft",
            TodoState::Todo => "todo",
            TodoState::Doing => "doing",
            TodoState::Done => "done",
            TodoState::Trash => "trash",
        }
    }
}

impl FromStr for TodoState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TodoState::Draft),
            "todo" => Ok(TodoState::Todo),
            "doing" => Ok(TodoState::Doing),
            "done" => Ok(TodoState::Done),
            "trash" => Ok(TodoState::Trash),
            other => Err(StateError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CreateTodoCommand {
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoCommand {
    pub title: Option<TodoTitle>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

impl UpdateTodoCommand {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state.is_none()
    }

    /// Apply the set fields on top of `todo`.
    pub fn apply(self, todo: Todo) -> Todo {
        Todo {
            title: self.title.unwrap_or(todo.title),
            description: self.description.unwrap_or(todo.description),
            state: self.state.unwrap_or(todo.state),
            ..todo
        }
    }
}

/// Listing criteria. Text filters match substrings, `state` matches exactly.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub title: Option<SearchTerm>,
    pub description: Option<SearchTerm>,
    pub state: Option<TodoState>,
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: String,
    pub state: TodoState,
    pub user_id: UserId,
}
