//! Job-board users. Registration and authentication live elsewhere; this
//! module never reads or writes the password column.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::models::application::Application;
use crate::row::{FromRow, RowExt};
use crate::sql::{Changes, ColumnMap, query, sql_for_partial_update};
use crate::validate::{require_email, require_non_blank};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

const UPDATE_COLUMNS: ColumnMap<'static> = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl FromRow for User {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            username: row.try_get_column("username")?,
            first_name: row.try_get_column("first_name")?,
            last_name: row.try_get_column("last_name")?,
            email: row.try_get_column("email")?,
            is_admin: row.try_get_column("is_admin")?,
        })
    }
}

/// A user plus the ids of the jobs they applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub applications: Vec<i32>,
}

/// Partial changes for [`User::update`]. Password changes are not accepted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserPatch {
    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn to_changes(&self) -> JoblyResult<Changes> {
        if let Some(first) = &self.first_name {
            require_non_blank("firstName", first)?;
        }
        if let Some(last) = &self.last_name {
            require_non_blank("lastName", last)?;
        }
        if let Some(email) = &self.email {
            require_email("email", email)?;
        }

        let mut changes = Changes::new();
        changes
            .insert_opt("firstName", self.first_name.as_deref())
            .insert_opt("lastName", self.last_name.as_deref())
            .insert_opt("email", self.email.as_deref())
            .insert_opt("isAdmin", self.is_admin);
        Ok(changes)
    }
}

fn user_not_found(username: &str) -> JoblyError {
    tracing::debug!(username, "user not found");
    JoblyError::not_found(format!("No user: {username}"))
}

impl User {
    /// All users, ordered by username.
    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<User>> {
        query(format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"))
            .tag("users.find_all")
            .fetch_all_as(conn)
            .await
    }

    /// Get a user with the ids of the jobs they applied to.
    pub async fn get(conn: &impl GenericClient, username: &str) -> JoblyResult<UserDetail> {
        let user: User = query(format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .tag("users.get")
            .bind(username)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| user_not_found(username))?;

        let applications = Application::job_ids_for_user(conn, username).await?;
        Ok(UserDetail { user, applications })
    }

    pub async fn update(
        conn: &impl GenericClient,
        username: &str,
        patch: &UserPatch,
    ) -> JoblyResult<User> {
        let changes = patch.to_changes()?;
        let update = sql_for_partial_update(&changes, UPDATE_COLUMNS)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = {} RETURNING {USER_COLUMNS}",
            update.set_cols,
            update.next_placeholder()
        );
        query(sql)
            .tag("users.update")
            .bind_all(update.into_values())
            .bind(username)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| user_not_found(username))
    }

    pub async fn remove(conn: &impl GenericClient, username: &str) -> JoblyResult<()> {
        let deleted = query("DELETE FROM users WHERE username = $1")
            .tag("users.remove")
            .bind(username)
            .execute(conn)
            .await?;
        if deleted == 0 {
            return Err(user_not_found(username));
        }
        Ok(())
    }

    /// Apply `username` to `job_id`.
    pub async fn apply_to_job(
        conn: &impl GenericClient,
        username: &str,
        job_id: i32,
    ) -> JoblyResult<Application> {
        Application::create(conn, username, job_id).await
    }
}
