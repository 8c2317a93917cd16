use super::{MAX_LOGGED_SQL, truncate_sql_bytes};
use crate::client::GenericClient;
use crate::error::JoblyResult;
use crate::row::FromRow;
use crate::value::Value;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Hand-written SQL with ordered [`Value`] binds.
///
/// Placeholder `$i` binds the i-th value passed to [`bind`](Query::bind) /
/// [`bind_all`](Query::bind_all), in call order.
///
/// ```ignore
/// let job: Job = query("SELECT * FROM jobs WHERE id = $1")
///     .tag("jobs.get")
///     .bind(id)
///     .fetch_one_as(&conn)
///     .await?;
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct Query {
    sql: String,
    params: Vec<Value>,
    tag: Option<String>,
}

impl Query {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            tag: None,
        }
    }

    /// Associate a tag for logging.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Bind the next parameter.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Bind several parameters, in order.
    pub fn bind_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }

    fn trace(&self) {
        tracing::debug!(
            target: "jobly.sql",
            tag = self.tag.as_deref().unwrap_or("-"),
            param_count = self.params.len(),
            sql = %truncate_sql_bytes(&self.sql, MAX_LOGGED_SQL),
        );
    }

    /// Execute the query and return all rows
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> JoblyResult<Vec<Row>> {
        self.trace();
        conn.query(&self.sql, &self.params_ref()).await
    }

    /// Execute the query and return all rows mapped to type T
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the first row; `NotFound` when empty
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> JoblyResult<Row> {
        self.trace();
        conn.query_one(&self.sql, &self.params_ref()).await
    }

    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the query and return at most one row
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> JoblyResult<Option<Row>> {
        self.trace();
        conn.query_opt(&self.sql, &self.params_ref()).await
    }

    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> JoblyResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the statement and return the number of affected rows
    pub async fn execute(&self, conn: &impl GenericClient) -> JoblyResult<u64> {
        self.trace();
        conn.execute(&self.sql, &self.params_ref()).await
    }
}
