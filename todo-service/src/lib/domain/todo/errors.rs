use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid todo id: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Unknown state '{0}' (expected draft, todo, doing, done or trash)")]
    Unknown(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchTermError {
    #[error("Search term too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Search term too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] SearchTermError),

    /// Missing, or owned by someone else.
    #[error("Task not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
