//! Finca repository
//!
//! Handles finca CRUD:
//! - list / find by owner / find by id: explicit column list, mapped by name
//! - insert / update / delete: report rows affected
//!
//! Each call acquires one pooled connection and runs one statement on it.
//! The connection goes back to the pool when the guard drops, on every
//! exit path including `?`.

use std::fmt;

use sqlx::PgPool;

use crate::error::DbError;
use crate::models::{Finca, NewFinca};

const SELECT_ALL: &str = r#"
    SELECT id, fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario
    FROM finca
    ORDER BY id
"#;

const SELECT_BY_OWNER: &str = r#"
    SELECT id, fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario
    FROM finca
    WHERE fin_usuario = $1
    ORDER BY id
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario
    FROM finca
    WHERE id = $1
"#;

const INSERT: &str = r#"
    INSERT INTO finca (fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const INSERT_RETURNING: &str = r#"
    INSERT INTO finca (fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id, fin_nombre, fin_direccion, fin_latitud, fin_longitud, fin_altitud, fin_usuario
"#;

const UPDATE: &str = r#"
    UPDATE finca
    SET fin_nombre = $1,
        fin_direccion = $2,
        fin_latitud = $3,
        fin_longitud = $4,
        fin_altitud = $5,
        fin_usuario = $6
    WHERE id = $7
"#;

const DELETE: &str = "DELETE FROM finca WHERE id = $1";

/// Finca repository
pub struct FincaRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FincaRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every finca, ordered by id ascending.
    pub async fn list_all(&self) -> Result<Vec<Finca>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let fincas: Vec<Finca> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await?;

        Ok(fincas)
    }

    /// List the fincas owned by a user, ordered by id.
    ///
    /// An empty vec means the owner has none. The owner id is not checked
    /// against `usuario`.
    pub async fn find_by_owner(&self, owner_id: i32) -> Result<Vec<Finca>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let fincas: Vec<Finca> = sqlx::query_as(SELECT_BY_OWNER)
            .bind(owner_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(fincas)
    }

    /// Get a single finca by id.
    ///
    /// Returns None if no row matches. More than one row is reported as
    /// [`DbError::Integrity`] rather than picking the first.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Finca>, DbError> {
        let mut conn = self.pool.acquire().await?;

        let mut rows: Vec<Finca> = sqlx::query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;

        single_row(id, &mut rows)
    }

    /// Insert a finca, returning rows affected.
    ///
    /// The generated id is not read back; use [`Self::insert_returning`]
    /// when the caller needs it.
    pub async fn insert(&self, finca: &NewFinca) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(INSERT)
            .bind(&finca.name)
            .bind(&finca.address)
            .bind(finca.latitude)
            .bind(finca.longitude)
            .bind(finca.altitude)
            .bind(finca.owner_id)
            .execute(&mut *conn)
            .await?;

        log_write("insert", None, finca);
        Ok(result.rows_affected())
    }

    /// Insert a finca and return the stored row with its generated id.
    pub async fn insert_returning(&self, finca: &NewFinca) -> Result<Finca, DbError> {
        let mut conn = self.pool.acquire().await?;

        let stored: Finca = sqlx::query_as(INSERT_RETURNING)
            .bind(&finca.name)
            .bind(&finca.address)
            .bind(finca.latitude)
            .bind(finca.longitude)
            .bind(finca.altitude)
            .bind(finca.owner_id)
            .fetch_one(&mut *conn)
            .await?;

        log_write("insert", Some(stored.id), &stored);
        Ok(stored)
    }

    /// Overwrite every column of the row keyed by `finca.id`.
    ///
    /// Returns 0 when the id does not exist.
    pub async fn update(&self, finca: &Finca) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(UPDATE)
            .bind(&finca.name)
            .bind(&finca.address)
            .bind(finca.latitude)
            .bind(finca.longitude)
            .bind(finca.altitude)
            .bind(finca.owner_id)
            .bind(finca.id)
            .execute(&mut *conn)
            .await?;

        log_write("update", Some(finca.id), finca);
        Ok(result.rows_affected())
    }

    /// Delete the row keyed by `finca.id` (idempotent).
    ///
    /// Returns 0 when the id does not exist.
    pub async fn delete(&self, finca: &Finca) -> Result<u64, DbError> {
        let rows = self.execute_delete(finca.id).await?;
        log_write("delete", Some(finca.id), finca);
        Ok(rows)
    }

    /// Delete by key alone, for callers that only hold an id.
    ///
    /// Returns 0 when the id does not exist.
    pub async fn delete_by_id(&self, id: i32) -> Result<u64, DbError> {
        let rows = self.execute_delete(id).await?;
        log_write("delete", Some(id), &format_args!("Finca {{ id: {} }}", id));
        Ok(rows)
    }

    async fn execute_delete(&self, id: i32) -> Result<u64, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(DELETE)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Debug event for a write: `"<op> finca, <entity>"`.
fn log_write(op: &'static str, finca_id: Option<i32>, entity: &dyn fmt::Display) {
    match finca_id {
        Some(finca_id) => tracing::debug!(op, finca_id, "{} finca, {}", op, entity),
        None => tracing::debug!(op, "{} finca, {}", op, entity),
    }
}

/// Collapse a unique-key lookup into zero or one row.
fn single_row(id: i32, rows: &mut Vec<Finca>) -> Result<Option<Finca>, DbError> {
    match rows.len() {
        0 | 1 => Ok(rows.pop()),
        n => Err(DbError::Integrity {
            resource: "finca",
            id: id.to_string(),
            rows: n,
        }),
    }
}
