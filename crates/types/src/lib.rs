//! Validated identifier types shared across the cordpipe crates.
//!
//! The batch harness hands us subject identifiers as raw strings. Everything
//! downstream — directory staging, derivative naming, the error-tracking log —
//! derives paths from that string, so it is validated once here and carried as
//! a typed value afterwards.

use std::fmt;
use std::path::Path;

/// Errors that can occur when validating a subject identifier.
#[derive(Debug, thiserror::Error)]
pub enum SubjectIdError {
    /// The input was empty or contained only whitespace.
    #[error("subject identifier cannot be empty")]
    Empty,
    /// The input contained more than one path separator.
    ///
    /// At most one separator is allowed, encoding a single session sub-path
    /// (`sub-01/ses-01`).
    #[error("subject identifier may contain at most one '/' (got: '{0}')")]
    TooManySeparators(String),
    /// A path component was empty, `.`/`..`, or contained a character outside
    /// the portable set.
    #[error("invalid subject identifier component: '{0}'")]
    InvalidComponent(String),
}

/// A validated subject identifier.
///
/// A subject identifier names one subject directory under the dataset root,
/// optionally with a session sub-directory (`sub-01` or `sub-01/ses-01`). It
/// is used in two forms:
///
/// - [`rel_path`](SubjectId::rel_path): the relative directory form, joined
///   under the dataset roots;
/// - [`flat`](SubjectId::flat): the filename-safe token with the separator
///   substituted by `_`, used as the prefix of every derived artifact name.
///
/// Once constructed, the identifier is guaranteed to be a safe relative path:
/// non-empty, at most one separator, no `.`/`..` components, and only
/// characters from a conservative ASCII set (alphanumeric, `-`, `_`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    /// Validates and wraps a subject identifier.
    ///
    /// The input is trimmed of surrounding whitespace before validation.
    ///
    /// # Errors
    ///
    /// Returns a [`SubjectIdError`] if the trimmed input is empty, contains
    /// more than one `/`, or has a component that is empty, `.`/`..`, or
    /// holds a character outside the portable set.
    pub fn new(input: impl AsRef<str>) -> Result<Self, SubjectIdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SubjectIdError::Empty);
        }

        if trimmed.matches('/').count() > 1 {
            return Err(SubjectIdError::TooManySeparators(trimmed.to_owned()));
        }

        for component in trimmed.split('/') {
            if component.is_empty() || component == "." || component == ".." {
                return Err(SubjectIdError::InvalidComponent(component.to_owned()));
            }
            let ok = component
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_'));
            if !ok {
                return Err(SubjectIdError::InvalidComponent(component.to_owned()));
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a relative directory path (`sub-01/ses-01`).
    pub fn rel_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Returns the filename-safe token with `/` substituted by `_`
    /// (`sub-01_ses-01`).
    ///
    /// Every derived artifact filename starts with this token.
    pub fn flat(&self) -> String {
        self.0.replace('/', "_")
    }

    /// Returns the identifier as a string slice in its relative-path form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SubjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SubjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        SubjectId::new(&s).map_err(serde::de::Error::custom)
    }
}
