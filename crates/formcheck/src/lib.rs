//! # formcheck
//!
//! Attribute-driven validation for HTML forms.
//!
//! formcheck reads the controls of a form, attaches validators to each one
//! from its markup (`required`, `minlength="5"`, `type="email"`,
//! `data-formcheck-<name>="..."`), evaluates them in priority order and hands
//! each result to a presenter that renders classes and error text.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formcheck::prelude::*;
//!
//! struct BrowserForm { /* DOM handles */ }
//! impl FormInspector for BrowserForm { /* ... */ }
//!
//! let mut session = Session::builder(BrowserForm::bind("#signup"))
//!     .presenter(BootstrapPresenter::default())
//!     .config(FormConfig::from_json(r#"{ "locale": "fr", "errorClass": "is-invalid" }"#)?)
//!     .validator(
//!         "username",
//!         ValidatorDef::new(|value, _, _| value.chars().all(char::is_alphanumeric))
//!             .message("Letters and digits only"),
//!     )
//!     .build();
//!
//! if !session.validate_all(ValidationMode::Report) {
//!     let report = session.report().to_json()?;
//! }
//! ```
//!
//! ## Features
//!
//! - **Markup-driven**: validators come from native and `data-formcheck-*` attributes
//! - **Ordered**: validators run by priority, `required` first and halting
//! - **Localized**: built-in `en`, `fr` and `de` messages, per-field overrides
//! - **Headless**: the DOM sits behind [`FormInspector`] and [`Presenter`]
//!
//! ## Optional Features
//!
//! - `tracing` (default) - diagnostics through the `tracing` crate
//! - `testing` - [`MockForm`](testing::MockForm) and
//!   [`RecordingPresenter`](testing::RecordingPresenter)
//!
//! ```toml
//! [dependencies]
//! formcheck = { version = "0.1", features = ["testing"] }
//! ```

// Re-export core functionality
pub use formcheck_core::*;

// Re-export the test harness (feature-gated)
#[cfg(feature = "testing")]
pub use formcheck_testing as testing;

// Re-export serialization crates for report handling
pub use serde;
pub use serde_json;

/// Prelude module - import everything you need with `use formcheck::prelude::*`
pub mod prelude {
    // Session
    pub use formcheck_core::{Session, SessionBuilder, ValidationMode};

    // Configuration
    pub use formcheck_core::{ConfigError, FormConfig, MessageCatalog};

    // Validators
    pub use formcheck_core::{FieldContext, Message, ValidatorDef};

    // Host contracts
    pub use formcheck_core::{
        Attribute, ControlKind, ElementId, FormInspector, LiveEvent, NullPresenter,
        PresentationTargets, Presenter,
    };

    // Results
    pub use formcheck_core::{FieldErrors, FieldState, ValidationReport};

    #[cfg(feature = "testing")]
    pub use formcheck_testing::{MockControl, MockForm, RecordingPresenter};
}
