//! Database configuration loaded from the environment.

use crate::error::{JoblyError, JoblyResult};

/// Environment variable holding the Postgres connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the pool size.
pub const MAX_POOL_SIZE_ENV: &str = "JOBLY_DB_MAX_POOL_SIZE";

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_pool_size: usize,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: 16,
        }
    }

    pub fn max_pool_size(mut self, max_pool_size: usize) -> Self {
        self.max_pool_size = max_pool_size;
        self
    }

    /// Load from the process environment, reading a `.env` file first if one exists.
    pub fn from_env() -> JoblyResult<Self> {
        // A missing .env is fine; variables may come from the real environment.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> JoblyResult<Self> {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| JoblyError::Config(format!("{DATABASE_URL_ENV} is not set")))?;

        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(MAX_POOL_SIZE_ENV) {
            let size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    JoblyError::Config(format!(
                        "{MAX_POOL_SIZE_ENV} must be a positive integer, got {raw:?}"
                    ))
                })?;
            config.max_pool_size = size;
        }

        tracing::debug!(max_pool_size = config.max_pool_size, "loaded database config");
        Ok(config)
    }

    /// Build a connection pool from these settings.
    #[cfg(feature = "pool")]
    pub fn create_pool(&self) -> JoblyResult<deadpool_postgres::Pool> {
        crate::pool::create_pool_with_config(&self.database_url, self.max_pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_url_with_default_pool_size() {
        let config =
            DbConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/jobly")]))
                .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/jobly");
        assert_eq!(config.max_pool_size, 16);
    }

    #[test]
    fn pool_size_override() {
        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/jobly"),
            ("JOBLY_DB_MAX_POOL_SIZE", "4"),
        ]))
        .unwrap();
        assert_eq!(config.max_pool_size, 4);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = DbConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));
    }

    #[test]
    fn bad_pool_size_is_an_error() {
        for bad in ["0", "-1", "many"] {
            let err = DbConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://localhost/jobly"),
                ("JOBLY_DB_MAX_POOL_SIZE", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, JoblyError::Config(_)), "{bad}");
        }
    }

    #[cfg(feature = "pool")]
    #[test]
    fn create_pool_rejects_malformed_url() {
        let err = DbConfig::new("postgresql://localhost:notaport/jobly")
            .create_pool()
            .unwrap_err();
        assert!(matches!(err, JoblyError::Connection(_)));
    }
}
