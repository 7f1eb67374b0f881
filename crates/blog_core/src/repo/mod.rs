//! Repository contracts and SQLite persistence for blog records.
//!
//! # Responsibility
//! - Keep SQL details behind `AuthorRepository` and `PostRepository`.
//! - Map storage constraint failures back to validation errors.
//!
//! # Invariants
//! - Writes accept only validated inputs (`NewAuthor`, `NewPost`, or
//!   records whose setters already ran their validators).
//! - Repositories refuse connections that are not fully migrated.
//! - `id`, `created_at` and `updated_at` are assigned by SQLite.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::Connection;

pub mod author_repo;
pub mod post_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and queries.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    /// Short stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::InvalidData(_) => "invalid_data",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_table",
            Self::MissingRequiredColumn { .. } => "missing_column",
        }
    }
}

/// Checks schema version, table and columns before a repository is built.
pub(crate) fn ensure_table_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(column) = columns
        .iter()
        .copied()
        .find(|column| !present.iter().any(|name| name == column))
    {
        return Err(RepoError::MissingRequiredColumn { table, column });
    }

    Ok(())
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Appends `LIMIT`/`OFFSET` clauses and their bind values.
pub(crate) fn push_pagination(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    limit: Option<u32>,
    offset: u32,
) {
    match limit {
        Some(limit) => {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }
        None if offset > 0 => sql.push_str(" LIMIT -1"),
        None => return,
    }
    if offset > 0 {
        sql.push_str(" OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }
}
