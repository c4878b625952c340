pub mod episodes;
pub mod movie_types;
pub mod movies;
pub mod recommendations;
pub mod references;
pub mod seasons;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;

use crate::error::{CatalogError, Result};

pub(crate) async fn begin(
    pool: &PgPool,
    operation: &str,
) -> Result<Transaction<'static, Postgres>> {
    pool.begin().await.map_err(|e| {
        CatalogError::Transaction(format!(
            "Failed to start transaction for {operation}: {e}"
        ))
    })
}

/// Commit on success, roll back on failure.
///
/// After a rollback, raw database failures come back as
/// [`CatalogError::Transaction`]; errors that already carry a catalog
/// meaning (`Conflict`, `NotFound`, ...) keep their class.
pub(crate) async fn settle<T>(
    tx: Transaction<'static, Postgres>,
    operation: &str,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            // Deferred constraints report here, so keep their class.
            tx.commit().await.map_err(|e| match CatalogError::from(e) {
                CatalogError::Database(inner) => CatalogError::Transaction(
                    format!("Failed to commit {operation}: {inner}"),
                ),
                classified => classified,
            })?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(
                    operation,
                    error = %rollback,
                    "rollback failed; connection will be discarded"
                );
            }
            warn!(operation, error = %err, "transaction rolled back");
            Err(match err {
                CatalogError::Database(inner) => CatalogError::Transaction(
                    format!("{operation} rolled back: {inner}"),
                ),
                classified => classified,
            })
        }
    }
}

/// `NotFound` when a targeted write touched nothing.
pub(crate) fn expect_affected(
    rows_affected: u64,
    kind: &str,
    id: impl std::fmt::Display,
) -> Result<()> {
    if rows_affected == 0 {
        Err(CatalogError::not_found(kind, id))
    } else {
        Ok(())
    }
}
