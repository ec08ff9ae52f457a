//! Self-validation contract shared by every entity.
//!
//! Entities report *all* violated rules at once as structured
//! `(field, reason)` pairs. Constructors and mutators call
//! [`Validate::validate`] after every state transition.

use std::fmt;

use serde::Serialize;

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the offending field.
    pub field: &'static str,

    /// Human-readable description of the rule that failed.
    pub reason: String,
}

impl Violation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Non-empty collection of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    /// Returns all violations in the order they were detected.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Returns true if any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Invariant check implemented by every entity.
pub trait Validate {
    /// Returns every rule the current state violates. Must be pure.
    fn violations(&self) -> Vec<Violation>;

    /// Returns `Ok(())` if no rule is violated.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}

/// Collects violations for a single entity.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a violation unless `ok` holds.
    pub(crate) fn check(&mut self, ok: bool, field: &'static str, reason: &str) -> &mut Self {
        if !ok {
            self.violations.push(Violation::new(field, reason));
        }
        self
    }

    /// Requires a non-blank string of at most `max` characters.
    pub(crate) fn text(&mut self, value: &str, field: &'static str, max: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.violations.push(Violation::new(field, "must not be blank"));
        } else if value.chars().count() > max {
            self.violations
                .push(Violation::new(field, format!("must be at most {max} characters")));
        }
        self
    }

    /// Requires a non-blank value that looks like an email address.
    pub(crate) fn email(&mut self, value: &str, field: &'static str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            self.violations.push(Violation::new(field, "must not be blank"));
        } else if !looks_like_email(value) {
            self.violations
                .push(Violation::new(field, "must be a valid email address"));
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Vec<Violation> {
        std::mem::take(&mut self.violations)
    }
}

/// Strips surrounding whitespace from a name or natural key before it is stored.
pub(crate) fn trimmed(value: impl Into<String>) -> String {
    value.into().trim().to_string()
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
