//! A user's application to a job.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt};
use crate::sql::query;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub username: String,
    pub job_id: i32,
}

impl FromRow for Application {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            username: row.try_get_column("username")?,
            job_id: row.try_get_column("job_id")?,
        })
    }
}

impl Application {
    /// Record that `username` applied to `job_id`.
    ///
    /// Both must exist; applying twice is a unique violation.
    pub async fn create(
        conn: &impl GenericClient,
        username: &str,
        job_id: i32,
    ) -> JoblyResult<Application> {
        query("SELECT id FROM jobs WHERE id = $1")
            .tag("applications.check_job")
            .bind(job_id)
            .fetch_opt_as::<i32>(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No job: {job_id}")))?;

        query("SELECT username FROM users WHERE username = $1")
            .tag("applications.check_user")
            .bind(username)
            .fetch_opt(conn)
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No username: {username}")))?;

        query(
            "INSERT INTO applications (job_id, username) VALUES ($1, $2) \
             RETURNING username, job_id",
        )
        .tag("applications.create")
        .bind(job_id)
        .bind(username)
        .fetch_one_as(conn)
        .await
    }

    /// Ids of the jobs a user applied to, ascending.
    pub async fn job_ids_for_user(
        conn: &impl GenericClient,
        username: &str,
    ) -> JoblyResult<Vec<i32>> {
        query("SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id")
            .tag("applications.job_ids_for_user")
            .bind(username)
            .fetch_all_as(conn)
            .await
    }
}
