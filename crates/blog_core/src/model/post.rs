//! Post record.
//!
//! # Responsibility
//! - Build validated Post drafts from caller input.
//! - Guard every content field update on stored Posts.
//!
//! # Invariants
//! - `title` contains at least one configured clickbait phrase.
//! - `category` is one of the configured categories.
//! - `content` is at least `min_content_chars` long.
//! - `summary` is at most `max_summary_chars` long; empty is allowed.

use crate::validation::{
    check_category, check_clickbait, check_max_chars, check_min_chars, PostRules,
    ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned Post identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller input for creating a Post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub category: String,
    pub summary: String,
}

/// Caller input for updating a Post. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
}

pub fn validate_title(title: &str, rules: &PostRules) -> ValidationResult<()> {
    check_clickbait(title, rules.clickbait_phrases.as_slice())
}

pub fn validate_content(content: &str, rules: &PostRules) -> ValidationResult<()> {
    check_min_chars("content", content, rules.min_content_chars)
}

pub fn validate_category(category: &str, rules: &PostRules) -> ValidationResult<()> {
    check_category(category, rules.categories.as_slice())
}

pub fn validate_summary(summary: &str, rules: &PostRules) -> ValidationResult<()> {
    check_max_chars("summary", summary, rules.max_summary_chars)
}

/// Validated Post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    title: String,
    content: String,
    category: String,
    summary: String,
}

impl NewPost {
    /// Validates `fields` in order: title, content, category, summary.
    pub fn new(fields: PostFields, rules: &PostRules) -> ValidationResult<Self> {
        validate_title(&fields.title, rules)?;
        validate_content(&fields.content, rules)?;
        validate_category(&fields.category, rules)?;
        validate_summary(&fields.summary, rules)?;
        Ok(Self {
            title: fields.title,
            content: fields.content,
            category: fields.category,
            summary: fields.summary,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

/// Stored Post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    category: String,
    summary: String,
    /// Unix epoch milliseconds.
    created_at: i64,
    /// Unix epoch milliseconds.
    updated_at: i64,
}

impl Post {
    pub(crate) fn from_storage(
        id: PostId,
        fields: PostFields,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            summary: fields.summary,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn set_title(
        &mut self,
        title: impl Into<String>,
        rules: &PostRules,
    ) -> ValidationResult<()> {
        let title = title.into();
        validate_title(&title, rules)?;
        self.title = title;
        Ok(())
    }

    pub fn set_content(
        &mut self,
        content: impl Into<String>,
        rules: &PostRules,
    ) -> ValidationResult<()> {
        let content = content.into();
        validate_content(&content, rules)?;
        self.content = content;
        Ok(())
    }

    pub fn set_category(
        &mut self,
        category: impl Into<String>,
        rules: &PostRules,
    ) -> ValidationResult<()> {
        let category = category.into();
        validate_category(&category, rules)?;
        self.category = category;
        Ok(())
    }

    pub fn set_summary(
        &mut self,
        summary: impl Into<String>,
        rules: &PostRules,
    ) -> ValidationResult<()> {
        let summary = summary.into();
        validate_summary(&summary, rules)?;
        self.summary = summary;
        Ok(())
    }

    /// Applies every supplied field, or none of them.
    pub fn apply_patch(&mut self, patch: PostPatch, rules: &PostRules) -> ValidationResult<()> {
        if let Some(title) = patch.title.as_deref() {
            validate_title(title, rules)?;
        }
        if let Some(content) = patch.content.as_deref() {
            validate_content(content, rules)?;
        }
        if let Some(category) = patch.category.as_deref() {
            validate_category(category, rules)?;
        }
        if let Some(summary) = patch.summary.as_deref() {
            validate_summary(summary, rules)?;
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        Ok(())
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={} content={}, summary={})",
            self.id, self.title, self.content, self.summary
        )
    }
}
