use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::NewTodo;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoFilter;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::models::TodoTitle;
use crate::domain::todo::ports::TodoRepository;
use crate::domain::user::models::UserId;

const TODO_COLUMNS: &str = "id, title, description, state, user_id, created_at, updated_at";

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    state: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = TodoError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        Ok(Todo {
            id: TodoId(row.id),
            title: TodoTitle::new(row.title)?,
            description: row.description,
            state: row.state.parse()?,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the owner-scoped listing query.
///
/// Text filters use `strpos` so user input is never interpreted as a
/// `LIKE` pattern.
fn list_query<'a>(owner: &UserId, filter: &'a TodoFilter) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = "));
    query.push_bind(owner.0);

    if let Some(title) = &filter.title {
        query
            .push(" AND strpos(title, ")
            .push_bind(title.as_str())
            .push(") > 0");
    }
    if let Some(description) = &filter.description {
        query
            .push(" AND strpos(description, ")
            .push_bind(description.as_str())
            .push(") > 0");
    }
    if let Some(state) = filter.state {
        query.push(" AND state = ").push_bind(state.as_str());
    }

    query
        .push(" ORDER BY id LIMIT ")
        .push_bind(filter.page.limit())
        .push(" OFFSET ")
        .push_bind(filter.page.offset());

    query
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!(
            r#"
            INSERT INTO todos (title, description, state, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.state.as_str())
        .bind(todo.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.try_into()
    }

    async fn find(&self, owner: &UserId, id: &TodoId) -> Result<Option<Todo>, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1 AND user_id = $2"
        ))
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.map(Todo::try_from).transpose()
    }

    async fn list(&self, owner: &UserId, filter: &TodoFilter) -> Result<Vec<Todo>, TodoError> {
        let rows = list_query(owner, filter)
            .build_query_as::<TodoRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!(
            r#"
            UPDATE todos
            SET title = $3, description = $4, state = $5, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        ))
        .bind(todo.id.0)
        .bind(todo.user_id.0)
        .bind(todo.title.as_str())
        .bind(&todo.description)
        .bind(todo.state.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        row.ok_or(TodoError::NotFound)?.try_into()
    }

    async fn delete(&self, owner: &UserId, id: &TodoId) -> Result<(), TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(owner.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TodoError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound);
        }

        Ok(())
    }
}
