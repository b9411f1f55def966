//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Every store operation
//! borrows one connection from here and hands it back on drop.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::StoreConfig;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/riego").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    pool_options(
        max_connections,
        Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
    )
    .connect(database_url)
    .await
}

/// Create a pool from loaded configuration.
pub async fn create_pool_from_config(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "opening database pool"
    );

    pool_options(
        config.max_connections,
        Duration::from_secs(config.acquire_timeout_secs),
    )
    .connect(&config.database_url)
    .await
}

/// Pool settings shared by every constructor.
fn pool_options(max_connections: u32, acquire_timeout: Duration) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_options_carry_limits() {
        let options = pool_options(3, Duration::from_secs(7));
        assert_eq!(options.get_max_connections(), 3);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(7));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p riego-store -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connections_return_to_pool() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 1)
            .await
            .expect("pool creation failed");

        // With a single slot, the second acquire only succeeds if the first
        // guard was released on drop.
        for i in 0..3 {
            let mut conn = pool.acquire().await.expect("acquire failed");
            let result: (i32,) = sqlx::query_as("SELECT $1::int")
                .bind(i)
                .fetch_one(&mut *conn)
                .await
                .expect("query failed");
            assert_eq!(result.0, i);
        }

        assert_eq!(pool.size(), 1);
    }
}
