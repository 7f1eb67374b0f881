//! Post repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths return the stored row read back after the mutation.
//! - Category filters use exact, case-sensitive matching.

use crate::model::post::{NewPost, Post, PostFields, PostId};
use crate::repo::{ensure_table_ready, push_pagination, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const POST_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    category,
    summary,
    created_at,
    updated_at
FROM posts";

const POST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "category",
    "summary",
    "created_at",
    "updated_at",
];

/// Query options for listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for Post CRUD.
pub trait PostRepository {
    fn create_post(&self, post: &NewPost) -> RepoResult<Post>;
    /// Persists the current field values of an existing Post.
    fn update_post(&self, post: &Post) -> RepoResult<Post>;
    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>>;
    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>>;
    fn delete_post(&self, id: PostId) -> RepoResult<()>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "posts", POST_COLUMNS)?;
        Ok(Self { conn })
    }

    fn read_back(&self, id: PostId) -> RepoResult<Post> {
        self.get_post(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("post {id} missing after write")))
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, post: &NewPost) -> RepoResult<Post> {
        self.conn.execute(
            "INSERT INTO posts (title, content, category, summary)
             VALUES (?1, ?2, ?3, ?4);",
            params![post.title(), post.content(), post.category(), post.summary()],
        )?;

        self.read_back(PostId(self.conn.last_insert_rowid()))
    }

    fn update_post(&self, post: &Post) -> RepoResult<Post> {
        let changed = self.conn.execute(
            "UPDATE posts
             SET
                title = ?1,
                content = ?2,
                category = ?3,
                summary = ?4,
                updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
             WHERE id = ?5;",
            params![
                post.title(),
                post.content(),
                post.category(),
                post.summary(),
                post.id().0,
            ],
        )?;

        if changed == 0 {
            return Err(not_found(post.id()));
        }
        self.read_back(post.id())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        let post = self
            .conn
            .query_row(
                &format!("{POST_SELECT_SQL} WHERE id = ?1;"),
                [id.0],
                parse_post_row,
            )
            .optional()?;
        Ok(post)
    }

    fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY id ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let posts = stmt
            .query_map(params_from_iter(bind_values), parse_post_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1;", [id.0])?;
        if changed == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn parse_post_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    let fields = PostFields {
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        summary: row.get("summary")?,
    };
    Ok(Post::from_storage(
        PostId(row.get("id")?),
        fields,
        row.get("created_at")?,
        row.get("updated_at")?,
    ))
}

fn not_found(id: PostId) -> RepoError {
    RepoError::NotFound {
        entity: "post",
        id: id.0,
    }
}
