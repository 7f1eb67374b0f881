//! Use-case services over the record repositories.
//!
//! # Responsibility
//! - Run field validation explicitly before every write.
//! - Keep callers decoupled from storage details.
//! - Emit one metadata-only log event per write use-case.

use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use std::time::Instant;

pub mod author_service;
pub mod post_service;

/// Logs the outcome of a write use-case without any record content.
pub(crate) fn log_outcome<T>(
    event: &'static str,
    module: &'static str,
    started_at: Instant,
    result: &RepoResult<T>,
    id_of: impl FnOnce(&T) -> i64,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => info!(
            "event={event} module={module} status=ok id={} duration_ms={duration_ms}",
            id_of(value)
        ),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module={module} status=error duration_ms={duration_ms} error_code=validation_failed field={}",
            err.field
        ),
        Err(err) => error!(
            "event={event} module={module} status=error duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
