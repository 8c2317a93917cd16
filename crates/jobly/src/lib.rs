//! # jobly
//!
//! Postgres data access for a job board: companies, jobs, users and
//! applications.
//!
//! ## Features
//!
//! - **Partial updates**: [`sql_for_partial_update`] turns an ordered list of
//!   changed fields into a `SET` fragment whose `$n` placeholders line up with
//!   the returned values
//! - **Filtered listings**: [`JobFilter`] and [`CompanyFilter`] render optional
//!   criteria into a `WHERE` fragment with correctly numbered placeholders
//! - **Bound values only**: user data reaches Postgres as [`Value`] parameters,
//!   never as SQL text
//! - **Transaction-friendly**: pass a transaction anywhere a [`GenericClient`]
//!   is expected
//!
//! ## Example
//!
//! ```ignore
//! use jobly::{Job, JobFilter, JobPatch};
//!
//! let pool = jobly::DbConfig::from_env()?.create_pool()?;
//! let client = pool.get().await?;
//!
//! let filter = JobFilter::new().title("engineer").min_salary(100_000).has_equity(true);
//! let jobs = Job::find_all(&client, Some(&filter)).await?;
//!
//! let job = Job::update(&client, jobs[0].id, &JobPatch::new().salary(120_000)).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod prelude;
pub mod row;
pub mod sql;
pub mod validate;
pub mod value;

pub use client::GenericClient;
pub use config::DbConfig;
pub use error::{JoblyError, JoblyResult};
pub use filter::{CompanyFilter, JobFilter, WhereClause, build_job_filter};
pub use models::{
    Application, Company, CompanyDetail, CompanyPatch, Job, JobPatch, NewCompany, NewJob, User,
    UserDetail, UserPatch,
};
pub use row::{FromRow, RowExt};
pub use sql::{Changes, ColumnMap, PartialUpdate, Query, query, sql_for_partial_update};
pub use value::Value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
