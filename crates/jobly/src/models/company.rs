//! Companies and their job postings.

use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::filter::CompanyFilter;
use crate::models::job::Job;
use crate::row::{FromRow, RowExt};
use crate::sql::{Changes, ColumnMap, query, sql_for_partial_update};
use crate::validate::{require_non_blank, require_non_negative, require_url};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

const UPDATE_COLUMNS: ColumnMap<'static> = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A company together with its jobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn validate(&self) -> JoblyResult<()> {
        require_non_blank("handle", &self.handle)?;
        require_non_blank("name", &self.name)?;
        require_non_negative("numEmployees", self.num_employees)?;
        if let Some(url) = &self.logo_url {
            require_url("logoUrl", url)?;
        }
        Ok(())
    }
}

/// Partial changes for [`Company::update`]. The handle cannot change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl CompanyPatch {
    pub fn from_json(json: serde_json::Value) -> JoblyResult<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn to_changes(&self) -> JoblyResult<Changes> {
        if let Some(name) = &self.name {
            require_non_blank("name", name)?;
        }
        require_non_negative("numEmployees", self.num_employees)?;
        if let Some(url) = &self.logo_url {
            require_url("logoUrl", url)?;
        }

        let mut changes = Changes::new();
        changes
            .insert_opt("name", self.name.as_deref())
            .insert_opt("description", self.description.as_deref())
            .insert_opt("numEmployees", self.num_employees)
            .insert_opt("logoUrl", self.logo_url.as_deref());
        Ok(changes)
    }
}

fn company_not_found(handle: &str) -> JoblyError {
    tracing::debug!(handle, "company not found");
    JoblyError::not_found(format!("No company: {handle}"))
}

impl Company {
    /// Create a company; a taken handle is invalid input.
    pub async fn create(conn: &impl GenericClient, new: &NewCompany) -> JoblyResult<Company> {
        new.validate()?;

        let existing = query("SELECT handle FROM companies WHERE handle = $1")
            .tag("companies.check_duplicate")
            .bind(new.handle.as_str())
            .fetch_opt(conn)
            .await?;
        if existing.is_some() {
            return Err(JoblyError::invalid_input(format!(
                "Duplicate company: {}",
                new.handle
            )));
        }

        query(format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .tag("companies.create")
        .bind(new.handle.as_str())
        .bind(new.name.as_str())
        .bind(new.description.as_str())
        .bind(new.num_employees)
        .bind(new.logo_url.as_deref())
        .fetch_one_as(conn)
        .await
    }

    /// List companies matching `filter`, ordered by name.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: Option<&CompanyFilter>,
    ) -> JoblyResult<Vec<Company>> {
        let clause = match filter {
            Some(filter) => filter.to_where_clause()?,
            None => Default::default(),
        };
        query(format!(
            "SELECT {COMPANY_COLUMNS} FROM companies{} ORDER BY name",
            clause.fragment
        ))
        .tag("companies.find_all")
        .bind_all(clause.values)
        .fetch_all_as(conn)
        .await
    }

    /// Get a company with its jobs.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<CompanyDetail> {
        let company: Company = query(format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1"
        ))
        .tag("companies.get")
        .bind(handle)
        .fetch_opt_as(conn)
        .await?
        .ok_or_else(|| company_not_found(handle))?;

        let jobs = Job::find_by_company(conn, handle).await?;
        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        patch: &CompanyPatch,
    ) -> JoblyResult<Company> {
        let changes = patch.to_changes()?;
        let update = sql_for_partial_update(&changes, UPDATE_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {COMPANY_COLUMNS}",
            update.set_cols,
            update.next_placeholder()
        );
        query(sql)
            .tag("companies.update")
            .bind_all(update.into_values())
            .bind(handle)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| company_not_found(handle))
    }

    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let deleted = query("DELETE FROM companies WHERE handle = $1")
            .tag("companies.remove")
            .bind(handle)
            .execute(conn)
            .await?;
        if deleted == 0 {
            return Err(company_not_found(handle));
        }
        Ok(())
    }
}
