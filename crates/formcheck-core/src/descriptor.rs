//! Validator descriptors.
//!
//! A descriptor is a named predicate plus the metadata the engine needs to
//! order it, decide whether to keep going after it fails, and render its
//! message. Hosts describe new validators with [`ValidatorDef`] and register
//! them by name; the registry turns each definition into an immutable
//! [`ValidatorDescriptor`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use formcheck_core::prelude::*;
//!
//! let def = ValidatorDef::new(|value, params, _ctx| {
//!     params.first().map_or(true, |other| value == other)
//! })
//! .message("Must be equal to ${1}")
//! .priority(5);
//! ```

use crate::context::FieldContext;
use std::fmt;
use std::sync::Arc;

/// Priority of validators that do not ask for one.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Validator predicate: `(value, params, context) -> passed`.
///
/// `params` holds the comma-split attribute value, so `params[0]` is the
/// template's `${1}`.
pub type EvaluateFn = Arc<dyn Fn(&str, &[String], &FieldContext<'_>) -> bool + Send + Sync>;

/// Computed message: `(value, args) -> message`.
///
/// `args` is indexed like a template: `args[0]` is the value and `args[i]`
/// the template's `${i}`.
pub type MessageFn = Arc<dyn Fn(&str, &[String]) -> String + Send + Sync>;

/// Failure message of a validator.
#[derive(Clone)]
pub enum Message {
    /// `${i}` template expanded against the value and parameters
    Template(String),
    /// Message produced by a function and used verbatim
    Computed(MessageFn),
}

impl Message {
    /// A message computed from the value and the `${i}` arguments.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
    {
        Message::Computed(Arc::new(f))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Message::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Message::Template(template.to_string())
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Message::Template(template)
    }
}

/// Definition of a validator, before registration.
#[derive(Clone)]
pub struct ValidatorDef {
    pub(crate) evaluate: EvaluateFn,
    pub(crate) message: Option<Message>,
    pub(crate) priority: Option<i32>,
    pub(crate) halt_on_failure: bool,
    pub(crate) locale: Option<String>,
}

impl ValidatorDef {
    /// Define a validator from its predicate.
    pub fn new<F>(evaluate: F) -> Self
    where
        F: Fn(&str, &[String], &FieldContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            evaluate: Arc::new(evaluate),
            message: None,
            priority: None,
            halt_on_failure: false,
            locale: None,
        }
    }

    /// Set the failure message. Without one the catalog default is used.
    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the priority; higher runs first. Defaults to [`DEFAULT_PRIORITY`].
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Stop evaluating the field's remaining validators when this one fails.
    pub fn halt_on_failure(mut self, halt: bool) -> Self {
        self.halt_on_failure = halt;
        self
    }

    /// Locale used to look up the default message.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

impl fmt::Debug for ValidatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDef")
            .field("message", &self.message)
            .field("priority", &self.priority)
            .field("halt_on_failure", &self.halt_on_failure)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

/// A registered validator.
#[derive(Clone)]
pub struct ValidatorDescriptor {
    name: String,
    evaluate: EvaluateFn,
    priority: i32,
    halt_on_failure: bool,
    message: Option<Message>,
    locale: String,
}

impl ValidatorDescriptor {
    pub(crate) fn new(
        name: impl Into<String>,
        def: ValidatorDef,
        message: Option<Message>,
        locale: String,
    ) -> Self {
        Self {
            name: name.into(),
            evaluate: def.evaluate,
            priority: def.priority.unwrap_or(DEFAULT_PRIORITY),
            halt_on_failure: def.halt_on_failure,
            message,
            locale,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn halts_on_failure(&self) -> bool {
        self.halt_on_failure
    }

    /// Default message, `None` when neither the definition nor the catalog
    /// provided one.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Locale the default message was resolved in.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Run the predicate.
    pub fn evaluate(&self, value: &str, params: &[String], ctx: &FieldContext<'_>) -> bool {
        (self.evaluate)(value, params, ctx)
    }

    /// Text used when no message is available at all.
    pub fn fallback_message(&self) -> String {
        format!("Validation failed for rule '{}'", self.name)
    }
}

impl fmt::Debug for ValidatorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("halt_on_failure", &self.halt_on_failure)
            .field("message", &self.message)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
