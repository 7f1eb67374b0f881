use blog_core::db::migrations::latest_version;
use blog_core::db::{open_db, open_db_in_memory, DbError};
use blog_core::{AuthorFields, AuthorService, SqliteAuthorRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "authors");
    assert_table_exists(&conn, "posts");
    assert_eq!(object_count(&conn, "index", "idx_authors_name"), 1);
    assert_eq!(object_count(&conn, "index", "idx_posts_category"), 1);
}

#[test]
fn reopening_file_database_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.sqlite3");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    {
        let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn_first).unwrap());
        service
            .create_author(AuthorFields::new("Ada", "5551234567"))
            .unwrap();
    }
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn_second).unwrap());
    assert!(service.find_author_by_name("Ada").unwrap().is_some());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 999);
    assert_eq!(object_count(&conn, "table", "authors"), 0);
    assert_eq!(object_count(&conn, "table", "posts"), 0);
}

#[test]
fn authors_name_has_unique_index() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Ada', '5551234567');",
        [],
    )
    .unwrap();

    let err = conn
        .execute(
            "INSERT INTO authors (name, phone_number) VALUES ('Ada', '5559876543');",
            [],
        )
        .unwrap_err();
    assert_eq!(
        err.sqlite_error_code(),
        Some(rusqlite::ErrorCode::ConstraintViolation)
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_eq!(
        object_count(conn, "table", table_name),
        1,
        "table {table_name} does not exist"
    );
}

fn object_count(conn: &Connection, object_type: &str, name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [object_type, name],
        |row| row.get(0),
    )
    .unwrap()
}
