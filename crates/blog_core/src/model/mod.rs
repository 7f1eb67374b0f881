//! Validated blog records.
//!
//! # Responsibility
//! - Define the Author and Post records and their caller-facing input shapes.
//! - Route every field assignment through the shared validators.
//!
//! # Invariants
//! - Record fields are private; setters validate before assigning.
//! - A failed setter leaves the record unchanged.
//! - `id`, `created_at` and `updated_at` are assigned by storage only.

pub mod author;
pub mod post;
