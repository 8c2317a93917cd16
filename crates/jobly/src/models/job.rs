//! Jobs posted by companies.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::{JobFilter, build_job_filter};
use crate::row::{FromRow, RowExt};
use crate::sql::{Changes, ColumnMap, query, sql_for_partial_update};
use crate::validate::{require_non_blank, require_non_negative};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Fields a patch may touch. `companyHandle` is deliberately absent.
const UPDATE_COLUMNS: ColumnMap<'static> = &[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn new(title: impl Into<String>, company_handle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            salary: None,
            equity: None,
            company_handle: company_handle.into(),
        }
    }

    pub fn salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn equity(mut self, equity: Decimal) -> Self {
        self.equity = Some(equity);
        self
    }

    /// Parse a JSON body; missing or mistyped fields are invalid input.
    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn validate(&self) -> JoblyResult<()> {
        require_non_blank("title", &self.title)?;
        require_non_blank("companyHandle", &self.company_handle)?;
        require_non_negative("salary", self.salary)?;
        validate_equity(self.equity)
    }
}

/// Partial changes for [`Job::update`].
///
/// `company_handle` exists only so that a body trying to move a job to another
/// company is rejected explicitly instead of being ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: Option<String>,
}

impl JobPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn equity(mut self, equity: Decimal) -> Self {
        self.equity = Some(equity);
        self
    }

    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    /// Validate and list the changed fields in declaration order.
    pub fn to_changes(&self) -> JoblyResult<Changes> {
        if self.company_handle.is_some() {
            return Err(JoblyError::invalid_input("Not allowed to change company handle"));
        }
        if let Some(title) = &self.title {
            require_non_blank("title", title)?;
        }
        require_non_negative("salary", self.salary)?;
        validate_equity(self.equity)?;

        let mut changes = Changes::new();
        changes
            .insert_opt("title", self.title.as_deref())
            .insert_opt("salary", self.salary)
            .insert_opt("equity", self.equity);
        Ok(changes)
    }
}

fn validate_equity(equity: Option<Decimal>) -> JoblyResult<()> {
    match equity {
        Some(e) if e < Decimal::ZERO || e > Decimal::ONE => Err(JoblyError::invalid_input(
            format!("equity must be between 0 and 1, got {e}"),
        )),
        _ => Ok(()),
    }
}

fn job_not_found(id: i32) -> JoblyError {
    tracing::debug!(job_id = id, "job not found");
    JoblyError::not_found(format!("No job: {id}"))
}

impl Job {
    /// Create a job and return it.
    pub async fn create(conn: &impl GenericClient, new_job: &NewJob) -> JoblyResult<Job> {
        new_job.validate()?;
        query(format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {JOB_COLUMNS}"
        ))
        .tag("jobs.create")
        .bind(new_job.title.as_str())
        .bind(new_job.salary)
        .bind(new_job.equity)
        .bind(new_job.company_handle.as_str())
        .fetch_one_as(conn)
        .await
    }

    /// List jobs matching `filter`, ordered by id.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: Option<&JobFilter>,
    ) -> JoblyResult<Vec<Job>> {
        let clause = build_job_filter(filter)?;
        query(format!(
            "SELECT {JOB_COLUMNS} FROM jobs{} ORDER BY id",
            clause.fragment
        ))
        .tag("jobs.find_all")
        .bind_all(clause.values)
        .fetch_all_as(conn)
        .await
    }

    /// Jobs posted by one company, ordered by id.
    pub async fn find_by_company(
        conn: &impl GenericClient,
        company_handle: &str,
    ) -> JoblyResult<Vec<Job>> {
        query(format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE company_handle = $1 ORDER BY id"
        ))
        .tag("jobs.find_by_company")
        .bind(company_handle)
        .fetch_all_as(conn)
        .await
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Job> {
        query(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .tag("jobs.get")
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| job_not_found(id))
    }

    /// Apply a partial update and return the updated job.
    pub async fn update(conn: &impl GenericClient, id: i32, patch: &JobPatch) -> JoblyResult<Job> {
        let changes = patch.to_changes()?;
        let update = sql_for_partial_update(&changes, UPDATE_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {JOB_COLUMNS}",
            update.set_cols,
            update.next_placeholder()
        );
        query(sql)
            .tag("jobs.update")
            .bind_all(update.into_values())
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| job_not_found(id))
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        query("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .tag("jobs.remove")
            .bind(id)
            .fetch_opt_as::<i32>(conn)
            .await?
            .map(|_| ())
            .ok_or_else(|| job_not_found(id))
    }
}
