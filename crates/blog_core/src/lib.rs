//! Validated Author/Post records for a small blogging data layer.
//! Every field assignment passes through a validator before it can be stored.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::{Author, AuthorFields, AuthorId, AuthorPatch, NewAuthor};
pub use model::post::{NewPost, Post, PostFields, PostId, PostPatch};
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::post_service::PostService;
pub use validation::{
    check_category, check_clickbait, AuthorNameLookup, PostRules, ValidationError,
    CATEGORIES, CLICKBAIT_PHRASES,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
