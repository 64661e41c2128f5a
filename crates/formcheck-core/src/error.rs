//! Error types and the serializable validation report.

use crate::inspector::ElementId;
use serde::{Deserialize, Serialize};

/// Error raised while loading or checking a [`FormConfig`](crate::FormConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
    /// A key holds a value the session cannot work with.
    #[error("configuration key `{key}` {reason}")]
    InvalidValue {
        /// The offending key, in its serialized (camelCase) spelling
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}

/// Error raised when a `pattern` parameter cannot be turned into a regex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The parameter is not a `/body/flags` literal.
    #[error("pattern `{0}` is not of the form /body/flags")]
    Malformed(String),
    /// The body is not a valid regular expression.
    #[error("pattern `{literal}` failed to compile: {reason}")]
    Compile {
        /// The literal as written in the attribute
        literal: String,
        /// Message from the regex engine
        reason: String,
    },
}

/// Current error messages of one invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    /// The control the messages belong to
    pub element: ElementId,
    /// Messages in validator priority order
    pub errors: Vec<String>,
}

impl FieldErrors {
    /// Create a new entry.
    pub fn new(element: ElementId, errors: Vec<String>) -> Self {
        Self { element, errors }
    }
}

/// Snapshot of a form's validation state, suitable for handing to a server
/// or a logging pipeline.
///
/// ```json
/// {
///   "valid": false,
///   "fields": [
///     { "element": 3, "errors": ["This field is required"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` when no tracked field is currently invalid
    pub valid: bool,
    /// Every field currently in the invalid state
    pub fields: Vec<FieldErrors>,
}

impl ValidationReport {
    /// Build a report from the invalid fields.
    pub fn from_fields(fields: Vec<FieldErrors>) -> Self {
        Self {
            valid: fields.is_empty(),
            fields,
        }
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.fields.iter().map(|f| f.errors.len()).sum()
    }

    /// Check if the report carries no messages.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for one element.
    pub fn get(&self, element: ElementId) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|f| f.element == element)
            .map(|f| f.errors.as_slice())
    }

    /// Serialize the report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
