use sqlx::error::ErrorKind;
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlRow};
use sqlx::query::{Query, QueryAs};
use sqlx::FromRow;

use crate::domain::repositories::StoreError;

/// Result of a mutating statement
///
/// `last_insert_id` is only meaningful after an insert into an
/// AUTO_INCREMENT column; it is 0 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ExecReport {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

/// Store gateway over a MySQL pool
///
/// Every call acquires its own connection, runs exactly one statement
/// inside its own transaction, and releases the connection before
/// returning. Failures are classified into [`StoreError`] and rolled back;
/// no raw driver error crosses this boundary.
#[derive(Clone)]
pub struct StoreGateway {
    pool: MySqlPool,
}

impl StoreGateway {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Executes a mutating statement, committing on success.
    pub async fn execute(
        &self,
        query: Query<'_, MySql, MySqlArguments>,
    ) -> Result<ExecReport, StoreError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        match query.execute(&mut *tx).await {
            Ok(done) => {
                tx.commit().await.map_err(classify)?;
                Ok(ExecReport {
                    rows_affected: done.rows_affected(),
                    last_insert_id: done.last_insert_id(),
                })
            }
            Err(err) => {
                let classified = classify(err);
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(classified)
            }
        }
    }

    /// Runs a row-returning statement and decodes every row.
    pub async fn fetch_all<T>(
        &self,
        query: QueryAs<'_, MySql, T, MySqlArguments>,
    ) -> Result<Vec<T>, StoreError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, MySqlRow>,
    {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        match query.fetch_all(&mut *tx).await {
            Ok(rows) => {
                tx.commit().await.map_err(classify)?;
                Ok(rows)
            }
            Err(err) => {
                let classified = classify(err);
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(classified)
            }
        }
    }

    /// Runs a row-returning statement expected to yield at most one row.
    pub async fn fetch_optional<T>(
        &self,
        query: QueryAs<'_, MySql, T, MySqlArguments>,
    ) -> Result<Option<T>, StoreError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, MySqlRow>,
    {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        match query.fetch_optional(&mut *tx).await {
            Ok(row) => {
                tx.commit().await.map_err(classify)?;
                Ok(row)
            }
            Err(err) => {
                let classified = classify(err);
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback_err);
                }
                Err(classified)
            }
        }
    }
}

/// Maps a driver error onto the store taxonomy.
///
/// Constraint violations keep the driver message for the response body;
/// connection-level failures collapse into `Unavailable`.
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation => StoreError::Duplicate(db.message().to_string()),
            ErrorKind::ForeignKeyViolation => StoreError::ForeignKey(db.message().to_string()),
            _ => StoreError::Internal(db.message().to_string()),
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => StoreError::Unavailable(err.to_string()),
        other => StoreError::Internal(other.to_string()),
    }
}
