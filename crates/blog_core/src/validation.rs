//! Field validators shared by Author and Post records.
//!
//! # Responsibility
//! - Provide pure gate functions that accept or reject one candidate value.
//! - Hold the default Post rule constants and the `PostRules` bundle.
//!
//! # Invariants
//! - Validators never transform accepted values.
//! - Validators never log and never touch storage.
//! - Lengths are counted in characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default phrase set gating Post titles.
pub const CLICKBAIT_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
/// Default allowed Post categories.
pub const CATEGORIES: [&str; 2] = ["Fiction", "Non-Fiction"];
/// Default minimum Post content length in characters.
pub const MIN_CONTENT_CHARS: usize = 250;
/// Default maximum Post summary length in characters.
pub const MAX_SUMMARY_CHARS: usize = 250;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone number regex"));

/// Rejection of one candidate field value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field, e.g. `phone_number`.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configurable constants for Post field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostRules {
    /// A title must contain at least one of these (case-sensitive).
    pub clickbait_phrases: Vec<String>,
    /// Exact-match set for `category`.
    pub categories: Vec<String>,
    pub min_content_chars: usize,
    pub max_summary_chars: usize,
}

impl Default for PostRules {
    fn default() -> Self {
        Self {
            clickbait_phrases: CLICKBAIT_PHRASES.iter().map(|p| p.to_string()).collect(),
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            min_content_chars: MIN_CONTENT_CHARS,
            max_summary_chars: MAX_SUMMARY_CHARS,
        }
    }
}

/// Capability to answer "does an Author with exactly this name exist?".
///
/// Implemented by in-memory name sets and by the SQLite author repository.
/// The answer is advisory; the `authors.name` unique index stays the
/// authoritative guarantee.
pub trait AuthorNameLookup {
    type Error: From<ValidationError>;

    fn author_name_exists(&self, name: &str) -> Result<bool, Self::Error>;
}

impl AuthorNameLookup for std::collections::HashSet<String> {
    type Error = ValidationError;

    fn author_name_exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.contains(name))
    }
}

impl AuthorNameLookup for std::collections::BTreeSet<String> {
    type Error = ValidationError;

    fn author_name_exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.contains(name))
    }
}

impl AuthorNameLookup for [&str] {
    type Error = ValidationError;

    fn author_name_exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.iter().any(|candidate| *candidate == name))
    }
}

/// Fails unless `title` contains at least one of `phrases`.
pub fn check_clickbait<S: AsRef<str>>(title: &str, phrases: &[S]) -> ValidationResult<()> {
    let phrases: Vec<&str> = phrases.iter().map(|phrase| phrase.as_ref()).collect();
    if phrases.iter().any(|phrase| title.contains(phrase)) {
        return Ok(());
    }
    Err(ValidationError::new(
        "title",
        format!(
            "Title must contain one of the following phrases: {}",
            phrases.join(", ")
        ),
    ))
}

/// Fails unless `category` equals one of `categories` exactly.
pub fn check_category<S: AsRef<str>>(category: &str, categories: &[S]) -> ValidationResult<()> {
    let categories: Vec<&str> = categories.iter().map(|allowed| allowed.as_ref()).collect();
    if categories.contains(&category) {
        return Ok(());
    }
    let message = match categories.as_slice() {
        [first, second] => format!("Category must be either {first} or {second}"),
        _ => format!("Category must be one of: {}", categories.join(", ")),
    };
    Err(ValidationError::new("category", message))
}

pub fn check_min_chars(field: &'static str, value: &str, min: usize) -> ValidationResult<()> {
    if value.chars().count() < min {
        return Err(ValidationError::new(
            field,
            format!("{} must be at least {min} characters long.", capitalize(field)),
        ));
    }
    Ok(())
}

pub fn check_max_chars(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("{} must be a maximum of {max} characters.", capitalize(field)),
        ));
    }
    Ok(())
}

/// Fails unless `phone_number` is exactly ten ASCII digits.
pub fn check_phone_number(phone_number: &str) -> ValidationResult<()> {
    if !PHONE_NUMBER_RE.is_match(phone_number) {
        return Err(ValidationError::new(
            "phone_number",
            "Phone number must be exactly 10 digits.",
        ));
    }
    Ok(())
}

pub fn check_name_present(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::new("name", "Author name cannot be empty."));
    }
    Ok(())
}

/// Fails when `lookup` already knows an Author named exactly `name`.
pub fn check_name_available<L>(name: &str, lookup: &L) -> Result<(), L::Error>
where
    L: AuthorNameLookup + ?Sized,
{
    if lookup.author_name_exists(name)? {
        return Err(duplicate_name_error().into());
    }
    Ok(())
}

pub(crate) fn duplicate_name_error() -> ValidationError {
    ValidationError::new("name", "An author with this name already exists.")
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn clickbait_accepts_any_known_phrase() {
        for title in [
            "You Won't Believe This",
            "The Secret Garden",
            "Top 10 Tricks",
            "Guess Who",
        ] {
            check_clickbait(title, &CLICKBAIT_PHRASES).expect("title should pass");
        }
    }

    #[test]
    fn clickbait_is_case_sensitive_and_lists_phrases() {
        let err = check_clickbait("the secret of my day", &CLICKBAIT_PHRASES).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(
            err.message,
            "Title must contain one of the following phrases: Won't Believe, Secret, Top, Guess"
        );
    }

    #[test]
    fn category_requires_exact_match() {
        check_category("Fiction", &CATEGORIES).unwrap();
        check_category("Non-Fiction", &CATEGORIES).unwrap();

        let err = check_category("fiction", &CATEGORIES).unwrap_err();
        assert_eq!(err.message, "Category must be either Fiction or Non-Fiction");
        assert!(check_category("Drama", &CATEGORIES).is_err());
        assert!(check_category("Fiction ", &CATEGORIES).is_err());
    }

    #[test]
    fn category_message_lists_every_allowed_value() {
        let three = ["Fiction", "Non-Fiction", "Poetry"];
        check_category("Poetry", &three).unwrap();
        let err = check_category("Drama", &three).unwrap_err();
        assert_eq!(err.message, "Category must be one of: Fiction, Non-Fiction, Poetry");

        let err = check_category("Drama", &["Essay"]).unwrap_err();
        assert_eq!(err.message, "Category must be one of: Essay");
    }

    #[test]
    fn length_gates_count_characters_not_bytes() {
        let accented = "é".repeat(250);
        assert_eq!(accented.len(), 500);
        check_max_chars("summary", &accented, 250).unwrap();
        check_min_chars("content", &accented, 250).unwrap();

        let err = check_min_chars("content", &"a".repeat(249), 250).unwrap_err();
        assert_eq!(err.message, "Content must be at least 250 characters long.");
        let err = check_max_chars("summary", &"a".repeat(251), 250).unwrap_err();
        assert_eq!(err.message, "Summary must be a maximum of 250 characters.");
    }

    #[test]
    fn phone_number_must_be_ten_ascii_digits() {
        check_phone_number("5551234567").unwrap();
        for bad in [
            "12345",
            "12345678901",
            "abc1234567",
            "123-456-7890",
            "5551234567\n",
            " 5551234567",
            "٥٥٥١٢٣٤٥٦٧",
            "",
        ] {
            let err = check_phone_number(bad).unwrap_err();
            assert_eq!(err.field, "phone_number", "input {bad:?}");
        }
    }

    #[test]
    fn name_checks_reject_empty_and_taken_names() {
        assert!(check_name_present("").is_err());
        check_name_present(" ").unwrap();

        let taken: HashSet<String> = ["Ada".to_string()].into_iter().collect();
        let err = check_name_available("Ada", &taken).unwrap_err();
        assert_eq!(err, duplicate_name_error());
        check_name_available("ada", &taken).unwrap();

        let slice: &[&str] = &["Grace"];
        assert!(check_name_available("Grace", slice).is_err());
    }

    #[test]
    fn post_rules_deserialize_with_defaults() {
        let rules: PostRules =
            serde_json::from_str(r#"{ "max_summary_chars": 120 }"#).expect("rules should parse");
        assert_eq!(rules.max_summary_chars, 120);
        assert_eq!(rules.min_content_chars, MIN_CONTENT_CHARS);
        assert_eq!(rules.categories, vec!["Fiction", "Non-Fiction"]);
    }

    #[test]
    fn validation_error_displays_field_and_message() {
        let err = ValidationError::new("name", "Author name cannot be empty.");
        assert_eq!(err.to_string(), "name: Author name cannot be empty.");
    }
}
