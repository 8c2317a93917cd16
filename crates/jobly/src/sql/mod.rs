//! SQL fragment building and execution.
//!
//! - [`sql_for_partial_update`] turns an ordered list of changes into a `SET`
//!   fragment plus the values bound to its placeholders.
//! - [`query()`] executes a full SQL string with `$1, $2, ...` placeholders and
//!   ordered [`Value`](crate::Value) binds.
//!
//! # Example
//!
//! ```ignore
//! use jobly::sql::{Changes, query, sql_for_partial_update};
//!
//! let changes = Changes::new().set("firstName", "Aliya").set("age", 32);
//! let update = sql_for_partial_update(&changes, &[("firstName", "first_name")])?;
//! assert_eq!(update.set_cols, r#""first_name"=$1, "age"=$2"#);
//!
//! let sql = format!(
//!     "UPDATE users SET {} WHERE username = {}",
//!     update.set_cols,
//!     update.next_placeholder()
//! );
//! query(sql).bind_all(update.values).bind("u1").execute(&conn).await?;
//! ```

mod partial_update;
mod query;


pub use partial_update::{Changes, ColumnMap, PartialUpdate, sql_for_partial_update};
pub use query::Query;

/// Build a query from a pre-numbered SQL string (`$1, $2, ...`).
pub fn query(sql: impl Into<String>) -> Query {
    Query::new(sql)
}

/// Longest SQL prefix (in bytes) written to logs.
pub(crate) const MAX_LOGGED_SQL: usize = 200;

/// Truncate `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
