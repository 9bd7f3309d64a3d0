//! Scoped unit-of-work over the todo store.
//!
//! One unit-of-work per service call, no nesting, no cross-call sharing.
//! Changes made within the scope are committed on [`UnitOfWork::commit`] and
//! rolled back when the scope ends any other way.

use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A bounded transaction scope with commit-on-success semantics.
///
/// `commit` and `rollback` consume the scope; dropping an unconsumed scope
/// rolls it back through the underlying transaction guard.
pub struct UnitOfWork {
    inner: Option<sqlx::Transaction<'static, Sqlite>>,
}

impl UnitOfWork {
    pub(crate) async fn begin(pool: &SqlitePool) -> StoreResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| StoreError::transaction(format!("failed to begin: {e}")))?;
        debug!("unit of work opened");
        Ok(Self { inner: Some(tx) })
    }

    /// Executor for queries running inside this scope.
    pub fn conn(&mut self) -> StoreResult<&mut SqliteConnection> {
        match self.inner.as_mut() {
            Some(tx) => Ok(&mut *tx),
            None => Err(StoreError::transaction("unit of work already consumed")),
        }
    }

    /// Commit the scope, making its changes durable.
    pub async fn commit(mut self) -> StoreResult<()> {
        match self.inner.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| StoreError::transaction(format!("failed to commit: {e}")))?;
                debug!("unit of work committed");
                Ok(())
            }
            None => Err(StoreError::transaction("unit of work already consumed")),
        }
    }

    /// Roll the scope back explicitly. Dropping without commit has the same
    /// effect.
    pub async fn rollback(mut self) -> StoreResult<()> {
        match self.inner.take() {
            Some(tx) => {
                tx.rollback()
                    .await
                    .map_err(|e| StoreError::transaction(format!("failed to rollback: {e}")))?;
                debug!("unit of work rolled back");
                Ok(())
            }
            None => Err(StoreError::transaction("unit of work already consumed")),
        }
    }

    /// Whether the scope is still open (not committed or rolled back).
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if let Some(tx) = self.inner.take() {
            debug!("unit of work dropped without commit, rolling back");
            drop(tx);
        }
    }
}
