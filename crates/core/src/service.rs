//! Todo service: the business operations over the store.
//!
//! Every operation opens exactly one unit-of-work and closes it before
//! returning. Missing rows come back as `None`/`false`; only store failures
//! are errors. The service performs no input validation — empty titles are a
//! presentation-layer rule, and the length ceilings are enforced by the
//! store schema.

use chrono::Utc;
use tracing::debug;

use crate::database::Database;
use crate::error::StoreResult;
use crate::model::{Todo, TodoCreate, TodoUpdate};
use crate::transaction::UnitOfWork;

const TODO_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// Service layer for todo operations.
///
/// Cheap to clone; every clone shares the same store handle.
#[derive(Clone)]
pub struct TodoService {
    db: Database,
}

impl TodoService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The store handle this service operates on.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Create a new todo item. The store assigns the id; `created_at` and
    /// `updated_at` are stamped with the same instant.
    pub async fn create(&self, input: TodoCreate) -> StoreResult<Todo> {
        let mut uow = self.db.begin().await?;
        let now = Utc::now();
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todo_items (title, description, completed, created_at, updated_at) \
             VALUES (?1, ?2, 0, ?3, ?3) RETURNING {TODO_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(now)
        .fetch_one(uow.conn()?)
        .await?;
        uow.commit().await?;
        debug!(id = todo.id, "todo created");
        Ok(todo)
    }

    /// All todo items, newest first. Rows created at the same instant come
    /// back in reverse id order, so the latest insert still leads.
    pub async fn list(&self) -> StoreResult<Vec<Todo>> {
        let mut uow = self.db.begin().await?;
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todo_items ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(uow.conn()?)
        .await?;
        uow.commit().await?;
        Ok(todos)
    }

    /// Look up a single todo item. No side effects.
    pub async fn get(&self, id: i64) -> StoreResult<Option<Todo>> {
        let mut uow = self.db.begin().await?;
        let todo = Self::fetch(&mut uow, id).await?;
        uow.commit().await?;
        Ok(todo)
    }

    /// Apply the present fields of `input` to an existing todo; absent
    /// fields keep their prior value. `updated_at` is refreshed even when
    /// every field is absent. Returns `None` for an unknown id — no
    /// create-on-missing.
    pub async fn update(&self, id: i64, input: TodoUpdate) -> StoreResult<Option<Todo>> {
        let mut uow = self.db.begin().await?;
        let Some(mut todo) = Self::fetch(&mut uow, id).await? else {
            uow.rollback().await?;
            return Ok(None);
        };

        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(description) = input.description {
            todo.description = description;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();

        Self::store(&mut uow, &todo).await?;
        uow.commit().await?;
        debug!(id, "todo updated");
        Ok(Some(todo))
    }

    /// Flip the completion flag. Two toggles return a todo to its original
    /// state (modulo `updated_at`).
    pub async fn toggle(&self, id: i64) -> StoreResult<Option<Todo>> {
        let mut uow = self.db.begin().await?;
        let Some(mut todo) = Self::fetch(&mut uow, id).await? else {
            uow.rollback().await?;
            return Ok(None);
        };

        todo.completed = !todo.completed;
        todo.updated_at = Utc::now();

        Self::store(&mut uow, &todo).await?;
        uow.commit().await?;
        debug!(id, completed = todo.completed, "todo completion toggled");
        Ok(Some(todo))
    }

    /// Remove a todo item. `true` when a row was deleted, `false` (and
    /// no-op) for an unknown id.
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        let mut uow = self.db.begin().await?;
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?1")
            .bind(id)
            .execute(uow.conn()?)
            .await?;
        uow.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!(id, "todo deleted");
        }
        Ok(deleted)
    }

    async fn fetch(uow: &mut UnitOfWork, id: i64) -> StoreResult<Option<Todo>> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todo_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(uow.conn()?)
        .await?;
        Ok(todo)
    }

    async fn store(uow: &mut UnitOfWork, todo: &Todo) -> StoreResult<()> {
        sqlx::query(
            "UPDATE todo_items \
             SET title = ?1, description = ?2, completed = ?3, updated_at = ?4 \
             WHERE id = ?5",
        )
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.updated_at)
        .bind(todo.id)
        .execute(uow.conn()?)
        .await?;
        Ok(())
    }
}
