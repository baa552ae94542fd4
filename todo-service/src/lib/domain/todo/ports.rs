use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::user::models::UserId;

/// Port for todo domain service operations.
///
/// Every operation is scoped to `owner`; another user's todo behaves
/// exactly like a missing one.
#[async_trait]
pub trait TodoServicePort: Send + Sync + 'static {
    async fn create_todo(&self, owner: &UserId, command: CreateTodoCommand)
        -> Result<Todo, TodoError>;

    async fn list_todos(&self, owner: &UserId, filter: TodoFilter) -> Result<Vec<Todo>, TodoError>;

    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    /// * `DatabaseError` - Database operation failed
    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - No todo with this id belongs to `owner`
    /// * `DatabaseError` - Database operation failed
    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}

/// Persistence operations for todos.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    async fn find(&self, owner: &UserId, id: &TodoId) -> Result<Option<Todo>, TodoError>;

    async fn list(&self, owner: &UserId, filter: &TodoFilter) -> Result<Vec<Todo>, TodoError>;

    /// Persist title, description and state.
    ///
    /// # Errors
    /// * `NotFound` - No row with this id and owner
    async fn update(&self, todo: Todo) -> Result<Todo, TodoError>;

    /// # Errors
    /// * `NotFound` - No row with this id and owner
    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError>;
}
