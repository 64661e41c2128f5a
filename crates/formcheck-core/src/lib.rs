//! # formcheck core
//!
//! Rule engine for HTML form validation. A [`Session`] reads a form through a
//! [`FormInspector`], attaches validators to each control from its markup
//! attributes, evaluates them by priority and hands every decision to a
//! [`Presenter`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use formcheck_core::prelude::*;
//!
//! // <input name="user" required minlength="5">
//! let mut session = Session::new(form, NullPresenter, FormConfig::default());
//!
//! if !session.validate_all(ValidationMode::Report) {
//!     for field in session.errors() {
//!         println!("{}: {:?}", field.element, field.errors);
//!     }
//! }
//! ```
//!
//! ## Attributes
//!
//! - `required`, `min`, `max`, `minlength`, `maxlength`, `pattern`
//! - `type="email"` / `type="number"` and other types naming a validator
//! - `data-formcheck-<name>="a,b"` for any registered validator
//! - `data-formcheck-type="<name>"`
//! - `data-formcheck-<name>-message[-<locale>]` to override a message
//!
//! ## Built-in validators
//!
//! | Name        | Priority | Halts | Passes when                                |
//! |-------------|----------|-------|--------------------------------------------|
//! | `required`  | 99       | yes   | non-empty, or a checked box in the group   |
//! | `number`    | 2        | no    | empty or a float                           |
//! | `email`     | 1        | no    | empty or `local@domain.tld`                |
//! | `integer`   | 1        | no    | empty or decimal digits only               |
//! | `minlength` | 1        | no    | empty or at least `${1}` characters        |
//! | `maxlength` | 1        | no    | empty or at most `${1}` characters         |
//! | `min`/`max` | 1        | no    | value (or checked count) within the bound  |
//! | `pattern`   | 1        | no    | empty or matches the `/body/flags` literal |
//! | `text`      | 0        | no    | always                                     |

pub mod builtins;
mod catalog;
mod config;
mod context;
mod descriptor;
mod engine;
mod error;
mod field;
mod inspector;
mod presenter;
mod registry;
mod resolver;
mod session;
mod template;
pub mod tracing_macros;


pub use catalog::{normalize_locale, MessageCatalog, DEFAULT_LOCALE};
pub use config::FormConfig;
pub use context::FieldContext;
pub use descriptor::{EvaluateFn, Message, MessageFn, ValidatorDef, ValidatorDescriptor, DEFAULT_PRIORITY};
pub use engine::{evaluate_field, Outcome};
pub use error::{ConfigError, FieldErrors, PatternError, ValidationReport};
pub use field::{Field, FieldState};
pub use inspector::{Attribute, ControlKind, ElementId, FormInspector, LiveEvent};
pub use presenter::{NullPresenter, PresentationTargets, Presenter};
pub use registry::ValidatorRegistry;
pub use resolver::{resolve, MessageOverrides, Parameters, ResolvedField, ATTRIBUTE_PREFIX, NATIVE_ATTRIBUTES};
pub use session::{Session, SessionBuilder, ValidationMode};
pub use template::expand;

/// Prelude module for form validation
pub mod prelude {
    pub use crate::config::FormConfig;
    pub use crate::descriptor::{Message, ValidatorDef};
    pub use crate::error::{ConfigError, FieldErrors, ValidationReport};
    pub use crate::field::FieldState;
    pub use crate::inspector::{Attribute, ControlKind, ElementId, FormInspector, LiveEvent};
    pub use crate::presenter::{NullPresenter, PresentationTargets, Presenter};
    pub use crate::session::{Session, SessionBuilder, ValidationMode};
}
