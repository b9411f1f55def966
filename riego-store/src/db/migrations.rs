//! Bootstrap schema for the finca tables

use sqlx::PgPool;

/// Create the `usuario` and `finca` tables if they are missing.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running finca migrations...");

    // Owners. Only the key matters to the store; the rest belongs to the
    // user module of the application.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usuario (
            id SERIAL PRIMARY KEY,
            usu_nombre TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS finca (
            id SERIAL PRIMARY KEY,
            fin_nombre TEXT NOT NULL,
            fin_direccion TEXT NOT NULL,
            fin_latitud DOUBLE PRECISION NOT NULL,
            fin_longitud DOUBLE PRECISION NOT NULL,
            fin_altitud DOUBLE PRECISION NOT NULL,
            fin_usuario INTEGER NOT NULL REFERENCES usuario(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_finca_usuario ON finca(fin_usuario)")
        .execute(pool)
        .await?;

    tracing::info!("Finca migrations complete");
    Ok(())
}
