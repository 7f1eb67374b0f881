//! Author record.
//!
//! # Responsibility
//! - Build validated Author drafts from caller input.
//! - Guard `name` and `phone_number` updates on stored Authors.
//!
//! # Invariants
//! - `name` is non-empty and was not taken when it was assigned.
//! - `phone_number` is exactly ten ASCII digits.
//! - Reassigning the current name fails: the lookup finds the record itself.

use crate::validation::{
    check_name_available, check_name_present, check_phone_number, AuthorNameLookup,
    ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned Author identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller input for creating an Author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorFields {
    pub name: String,
    pub phone_number: String,
}

impl AuthorFields {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Caller input for updating an Author. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// Validated Author that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAuthor {
    name: String,
    phone_number: String,
}

impl NewAuthor {
    /// Validates `fields` in order: name presence, name availability, phone.
    ///
    /// # Errors
    /// - `ValidationError` on the first rejected field.
    /// - The lookup's own error when the name query fails.
    pub fn new<L>(fields: AuthorFields, names: &L) -> Result<Self, L::Error>
    where
        L: AuthorNameLookup + ?Sized,
    {
        check_name_present(&fields.name)?;
        check_name_available(&fields.name, names)?;
        check_phone_number(&fields.phone_number)?;
        Ok(Self {
            name: fields.name,
            phone_number: fields.phone_number,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// Stored Author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    id: AuthorId,
    name: String,
    phone_number: String,
    /// Unix epoch milliseconds.
    created_at: i64,
    /// Unix epoch milliseconds.
    updated_at: i64,
}

impl Author {
    /// Rebuilds a record from a storage row. Only the repository calls this.
    pub(crate) fn from_storage(
        id: AuthorId,
        name: String,
        phone_number: String,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Assigns a new name after the same checks used at creation.
    pub fn set_name<L>(&mut self, name: impl Into<String>, names: &L) -> Result<(), L::Error>
    where
        L: AuthorNameLookup + ?Sized,
    {
        let name = name.into();
        check_name_present(&name)?;
        check_name_available(&name, names)?;
        self.name = name;
        Ok(())
    }

    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) -> ValidationResult<()> {
        let phone_number = phone_number.into();
        check_phone_number(&phone_number)?;
        self.phone_number = phone_number;
        Ok(())
    }

    /// Applies every supplied field, or none of them.
    pub fn apply_patch<L>(&mut self, patch: AuthorPatch, names: &L) -> Result<(), L::Error>
    where
        L: AuthorNameLookup + ?Sized,
    {
        if let Some(name) = patch.name.as_deref() {
            check_name_present(name)?;
            check_name_available(name, names)?;
        }
        if let Some(phone_number) = patch.phone_number.as_deref() {
            check_phone_number(phone_number)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        Ok(())
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::collections::HashSet;

    fn names(values: &[&str]) -> HashSet<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn stored(name: &str) -> Author {
        Author::from_storage(AuthorId(7), name.to_string(), "5551234567".to_string(), 1, 1)
    }

    #[test]
    fn new_author_keeps_values_verbatim() {
        let draft = NewAuthor::new(AuthorFields::new("Ada", "5551234567"), &names(&[])).unwrap();
        assert_eq!(draft.name(), "Ada");
        assert_eq!(draft.phone_number(), "5551234567");
    }

    #[test]
    fn new_author_reports_name_before_phone() {
        let err = NewAuthor::new(AuthorFields::new("", "bad"), &names(&[])).unwrap_err();
        assert_eq!(err.field, "name");

        let err = NewAuthor::new(AuthorFields::new("Ada", "bad"), &names(&["Ada"])).unwrap_err();
        assert_eq!(err.message, "An author with this name already exists.");
    }

    #[test]
    fn failed_setter_leaves_record_unchanged() {
        let mut author = stored("Ada");
        let err = author.set_phone_number("123-456-7890").unwrap_err();
        assert_eq!(
            err,
            ValidationError::new("phone_number", "Phone number must be exactly 10 digits.")
        );
        assert_eq!(author.phone_number(), "5551234567");

        author.set_phone_number("5559876543").unwrap();
        assert_eq!(author.phone_number(), "5559876543");
    }

    #[test]
    fn reassigning_current_name_is_rejected() {
        let mut author = stored("Ada");
        let err = author.set_name("Ada", &names(&["Ada"])).unwrap_err();
        assert_eq!(err.field, "name");

        author.set_name("Grace", &names(&["Ada"])).unwrap();
        assert_eq!(author.name(), "Grace");
    }

    #[test]
    fn apply_patch_is_all_or_nothing() {
        let mut author = stored("Ada");
        let patch = AuthorPatch {
            name: Some("Grace".to_string()),
            phone_number: Some("12345".to_string()),
        };
        assert!(author.apply_patch(patch, &names(&["Ada"])).is_err());
        assert_eq!(author.name(), "Ada");
        assert_eq!(author.phone_number(), "5551234567");
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(stored("Ada").to_string(), "Author(id=7, name=Ada)");
    }
}
