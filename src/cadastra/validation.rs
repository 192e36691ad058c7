//! # Field Validation
//!
//! Pure checks for the two form fields. Each field is checked independently, so a
//! submission can carry a name error and an email error at the same time.
//!
//! | Field | `Required` when        | `Format` when                                     |
//! |-------|------------------------|---------------------------------------------------|
//! | name  | empty after trimming   | any char outside Latin letters (incl. accented) and whitespace |
//! | email | empty after trimming   | not shaped like `local@domain.tld` (no whitespace) |
//!
//! Format checks run on the trimmed value, since that is what gets stored.
//! There is no uniqueness check: two records may share a name or an email.

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s]+$").expect("valid name regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    Format,
}

impl FieldError {
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, FieldError::Required) => "Name is required",
            (Field::Name, FieldError::Format) => "Name may only contain letters and spaces",
            (Field::Email, FieldError::Required) => "Email is required",
            (Field::Email, FieldError::Format) => "Invalid email",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validation {
    pub name_error: Option<FieldError>,
    pub email_error: Option<FieldError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.name_error.is_none() && self.email_error.is_none()
    }

    /// Field errors paired with their messages, name first.
    pub fn messages(&self) -> Vec<(Field, &'static str)> {
        let mut out = Vec::new();
        if let Some(err) = self.name_error {
            out.push((Field::Name, err.message(Field::Name)));
        }
        if let Some(err) = self.email_error {
            out.push((Field::Email, err.message(Field::Email)));
        }
        out
    }
}

pub fn validate(name: &str, email: &str) -> Validation {
    Validation {
        name_error: check(name, &NAME_RE),
        email_error: check(email, &EMAIL_RE),
    }
}

fn check(value: &str, pattern: &Regex) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if !pattern.is_match(trimmed) {
        Some(FieldError::Format)
    } else {
        None
    }
}
