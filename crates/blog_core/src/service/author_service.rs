//! Author use-case service.
//!
//! # Invariants
//! - Name and phone validation run before any SQL mutation.
//! - A rejected update leaves the stored row untouched.

use crate::model::author::{Author, AuthorFields, AuthorId, AuthorPatch, NewAuthor};
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};
use crate::service::log_outcome;
use std::time::Instant;

/// Use-case service wrapper for Author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates `fields` against current storage and inserts the Author.
    ///
    /// # Errors
    /// - `RepoError::Validation` for an empty or taken name or a bad phone.
    pub fn create_author(&self, fields: AuthorFields) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = NewAuthor::new(fields, &self.repo)
            .and_then(|author| self.repo.create_author(&author));
        log_outcome("author_create", "author_service", started_at, &result, |a| {
            a.id().0
        });
        result
    }

    /// Re-validates each supplied field and persists the result.
    ///
    /// Supplying the Author's current name fails the uniqueness check.
    pub fn update_author(&self, id: AuthorId, patch: AuthorPatch) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = self.load(id).and_then(|mut author| {
            author.apply_patch(patch, &self.repo)?;
            self.repo.update_author(&author)
        });
        log_outcome("author_update", "author_service", started_at, &result, |a| {
            a.id().0
        });
        result
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_author(id);
        log_outcome("author_delete", "author_service", started_at, &result, |_| id.0);
        result
    }

    fn load(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            entity: "author",
            id: id.0,
        })
    }
}
