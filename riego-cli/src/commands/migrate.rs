//! Migrate command - create the finca schema if missing

use anyhow::{Context, Result};
use riego_store::db::migrations;
use sqlx::PgPool;

pub async fn run_migrate(pool: &PgPool) -> Result<()> {
    migrations::run(pool)
        .await
        .context("Failed to run finca migrations")?;

    println!("Schema is up to date");
    Ok(())
}
