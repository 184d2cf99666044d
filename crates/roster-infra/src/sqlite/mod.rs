//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools, plus the row/column helpers they share.

pub mod guild;
pub mod player;
pub mod pool;
pub mod propagation;
pub mod race;
pub mod skill;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

use roster_core::repository::{ListOptions, SortOrder};
use roster_types::error::RepositoryError;

/// Which storage constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    Unique,
    ForeignKey,
}

/// Classify a failed write by the SQLite constraint message.
pub(crate) fn constraint_kind(err: &sqlx::Error) -> Option<ConstraintKind> {
    match err {
        sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE") => {
            Some(ConstraintKind::Unique)
        }
        sqlx::Error::Database(db_err) if db_err.message().contains("FOREIGN KEY") => {
            Some(ConstraintKind::ForeignKey)
        }
        _ => None,
    }
}

pub(crate) fn query_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(err.to_string())
}

/// Parse a stored id column into its typed id.
pub(crate) fn parse_id<T>(kind: &str, raw: &str) -> Result<T, RepositoryError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| RepositoryError::Query(format!("invalid {kind} id '{raw}': {e}")))
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Append `ORDER BY`, `LIMIT` and `OFFSET` clauses.
pub(crate) fn push_list_options(
    qb: &mut QueryBuilder<'_, Sqlite>,
    sort_column: &'static str,
    options: &ListOptions,
) {
    let order = match options.sort_order.unwrap_or_default() {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    qb.push(format!(" ORDER BY {sort_column} {order}"));

    match (options.limit, options.offset) {
        (Some(limit), offset) => {
            qb.push(" LIMIT ").push_bind(limit);
            if let Some(offset) = offset {
                qb.push(" OFFSET ").push_bind(offset);
            }
        }
        // SQLite has no bare OFFSET
        (None, Some(offset)) => {
            qb.push(" LIMIT -1 OFFSET ").push_bind(offset);
        }
        (None, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_roundtrip_keeps_subseconds() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_list_options_sql() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM races");
        push_list_options(
            &mut qb,
            "name",
            &ListOptions {
                sort_order: Some(SortOrder::Desc),
                limit: None,
                offset: Some(5),
            },
        );
        assert_eq!(
            qb.sql(),
            "SELECT * FROM races ORDER BY name DESC LIMIT -1 OFFSET ?"
        );
    }
}
