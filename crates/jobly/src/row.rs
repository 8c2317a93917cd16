//! Row mapping traits and utilities

use crate::error::{JoblyError, JoblyResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use jobly::{FromRow, JoblyResult, RowExt};
///
/// struct JobId {
///     id: i32,
/// }
///
/// impl FromRow for JobId {
///     fn from_row(row: &tokio_postgres::Row) -> JoblyResult<Self> {
///         Ok(Self { id: row.try_get_column("id")? })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> JoblyResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning JoblyError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> JoblyResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| JoblyError::decode(column, e.to_string()))
    }
}

/// Single-column rows, e.g. `SELECT id FROM jobs`.
impl FromRow for i32 {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        row.try_get(0)
            .map_err(|e| JoblyError::decode("0", e.to_string()))
    }
}
