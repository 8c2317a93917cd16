//! Error types for jobly

use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Error types for builder, model and database operations
#[derive(Debug, Error)]
pub enum JoblyError {
    /// Caller supplied empty or malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl JoblyError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "invalid input");
        Self::InvalidInput(message)
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Whether the error was caused by the caller's input rather than the store.
    ///
    /// An HTTP layer maps these to 4xx responses; everything else is a 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::NotFound(_)
                | Self::UniqueViolation(_)
                | Self::ForeignKeyViolation(_)
                | Self::CheckViolation(_)
        )
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                "23514" => return Self::CheckViolation(format!("{}: {}", constraint, message)),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

impl From<serde_json::Error> for JoblyError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input(err.to_string())
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
