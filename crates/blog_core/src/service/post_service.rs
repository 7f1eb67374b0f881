//! Post use-case service.
//!
//! # Invariants
//! - Every write is validated against the service's `PostRules`.
//! - A rejected update leaves the stored row untouched.

use crate::model::post::{NewPost, Post, PostFields, PostId, PostPatch};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::log_outcome;
use crate::validation::PostRules;
use std::time::Instant;

/// Use-case service wrapper for Post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
    rules: PostRules,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R, rules: PostRules) -> Self {
        Self { repo, rules }
    }

    pub fn rules(&self) -> &PostRules {
        &self.rules
    }

    pub fn create_post(&self, fields: PostFields) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = NewPost::new(fields, &self.rules)
            .map_err(RepoError::from)
            .and_then(|post| self.repo.create_post(&post));
        log_outcome("post_create", "post_service", started_at, &result, |p| {
            p.id().0
        });
        result
    }

    /// Re-validates each supplied field and persists the result.
    pub fn update_post(&self, id: PostId, patch: PostPatch) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = self.load(id).and_then(|mut post| {
            post.apply_patch(patch, &self.rules)?;
            self.repo.update_post(&post)
        });
        log_outcome("post_update", "post_service", started_at, &result, |p| {
            p.id().0
        });
        result
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_post(id);
        log_outcome("post_delete", "post_service", started_at, &result, |_| id.0);
        result
    }

    fn load(&self, id: PostId) -> RepoResult<Post> {
        self.repo.get_post(id)?.ok_or(RepoError::NotFound {
            entity: "post",
            id: id.0,
        })
    }
}
