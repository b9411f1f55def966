//! Error types for riego-store

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A lookup by unique key matched more than one row.
    #[error("integrity fault: {rows} {resource} rows for id '{id}'")]
    Integrity {
        resource: &'static str,
        id: String,
        rows: usize,
    },
}

pub type DbResult<T> = Result<T, DbError>;
