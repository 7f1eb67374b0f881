//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - `authors.name` is protected by a unique index; a violation surfaces as
//!   the same `ValidationError` the in-process name check produces.
//! - Write paths return the stored row read back after the mutation.

use crate::model::author::{Author, AuthorId, NewAuthor};
use crate::repo::{
    ensure_table_ready, is_unique_violation, push_pagination, RepoError, RepoResult,
};
use crate::validation::{duplicate_name_error, AuthorNameLookup};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

const AUTHOR_COLUMNS: &[&str] = &["id", "name", "phone_number", "created_at", "updated_at"];

/// Query options for listing authors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for Author CRUD.
///
/// Every repository doubles as the name lookup used by uniqueness checks.
pub trait AuthorRepository: AuthorNameLookup<Error = RepoError> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author>;
    /// Persists the current field values of an existing Author.
    fn update_author(&self, author: &Author) -> RepoResult<Author>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Exact, case-sensitive name match.
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "authors", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }

    fn read_back(&self, id: AuthorId) -> RepoResult<Author> {
        self.get_author(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("author {id} missing after write")))
    }
}

impl AuthorNameLookup for SqliteAuthorRepository<'_> {
    type Error = RepoError;

    fn author_name_exists(&self, name: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM authors WHERE name = ?1);",
            [name],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<Author> {
        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name(), author.phone_number()],
            )
            .map_err(map_write_error)?;

        self.read_back(AuthorId(self.conn.last_insert_rowid()))
    }

    fn update_author(&self, author: &Author) -> RepoResult<Author> {
        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
                 WHERE id = ?3;",
                params![author.name(), author.phone_number(), author.id().0],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(not_found(author.id()));
        }
        self.read_back(author.id())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
                [id.0],
                parse_author_row,
            )
            .optional()?;
        Ok(author)
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"),
                [name],
                parse_author_row,
            )
            .optional()?;
        Ok(author)
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let authors = stmt
            .query_map(params_from_iter(bind_values), parse_author_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id.0])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn parse_author_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author::from_storage(
        AuthorId(row.get("id")?),
        row.get("name")?,
        row.get("phone_number")?,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    if is_unique_violation(&err) {
        return RepoError::Validation(duplicate_name_error());
    }
    err.into()
}

fn not_found(id: AuthorId) -> RepoError {
    RepoError::NotFound {
        entity: "author",
        id: id.0,
    }
}
