//! Convenient imports for typical `jobly` usage.
//!
//! ```ignore
//! use jobly::prelude::*;
//! ```

pub use crate::{
    Changes, CompanyFilter, FromRow, GenericClient, JobFilter, JoblyError, JoblyResult, Query,
    RowExt, Value, query, sql_for_partial_update,
};

pub use crate::models::{Application, Company, Job, User};

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
