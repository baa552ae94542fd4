use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::CreateTodoCommand;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::UpdateTodoCommand;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::todo::ports::TodoServicePort;
use crate::domain::user::models::UserId;

pub struct TodoService<TR>
where
    TR: TodoRepository,
{
    repository: Arc<TR>,
}

impl<TR> TodoService<TR>
where
    TR: TodoRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TodoServicePort for TodoService<TR>
where
    TR: TodoRepository,
{
    async fn create_todo(
        &self,
        owner: &UserId,
        command: CreateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let todo = self
            .repository
            .create(NewTodo {
                title: command.title,
                description: command.description,
                state: command.state,
                user_id: *owner,
            })
            .await?;

        tracing::info!(todo_id = %todo.id, user_id = %owner, "Todo created");
        Ok(todo)
    }

    async fn list_todos(&self, owner: &UserId, filter: TodoFilter) -> Result<Vec<Todo>, TodoError> {
        self.repository.list(owner, &filter).await
    }

    async fn update_todo(
        &self,
        owner: &UserId,
        id: &TodoId,
        command: UpdateTodoCommand,
    ) -> Result<Todo, TodoError> {
        let current = self
            .repository
            .find(owner, id)
            .await?
            .ok_or(TodoError::NotFound)?;

        if command.is_empty() {
            return Ok(current);
        }

        let updated = self.repository.update(command.apply(current)).await?;
        tracing::info!(todo_id = %id, user_id = %owner, "Todo updated");
        Ok(updated)
    }

    async fn delete_todo(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        self.repository.delete(owner, id).await?;
        tracing::info!(todo_id = %id, user_id = %owner, "Todo deleted");
        Ok(())
    }
}
