//! Deletes that report how far they propagated.
//!
//! SQLite applies `ON DELETE CASCADE` / `ON DELETE SET NULL` itself. Before
//! issuing the delete, the referencing rows for every declared `Reference`
//! are counted in the same transaction, so the returned report matches
//! exactly what the delete touched.

use roster_types::entity::EntityKind;
use roster_types::error::RepositoryError;
use roster_types::reference::{DeletionReport, PropagatedRows, Reference};

use super::pool::DatabasePool;
use super::query_error;

/// Delete the `target` row with primary key `id` and report propagation.
///
/// Returns `NotFound` (and rolls back) if no such row exists.
pub async fn delete_with_report(
    pool: &DatabasePool,
    target: EntityKind,
    id: &str,
) -> Result<DeletionReport, RepositoryError> {
    let mut tx = pool.writer.begin().await.map_err(query_error)?;
    let mut report = DeletionReport::new(target, id);

    for reference in Reference::pointing_at(target) {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?",
            reference.from.table_name(),
            reference.column
        );
        let (rows,): (i64,) = sqlx::query_as(&sql)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(query_error)?;

        report.propagated.push(PropagatedRows {
            entity: reference.from,
            column: reference.column,
            policy: reference.on_delete,
            rows: rows.max(0) as u64,
        });
    }

    let sql = format!("DELETE FROM {} WHERE id = ?", target.table_name());
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(query_error)?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    tx.commit().await.map_err(query_error)?;

    tracing::debug!(
        entity = %target,
        id,
        propagated = report.propagated.len(),
        "row deleted"
    );
    Ok(report)
}
