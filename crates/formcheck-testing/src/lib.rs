//! Testing utilities for formcheck
//!
//! # Mock form
//!
//! [`MockForm`] is an in-memory [`FormInspector`](formcheck_core::FormInspector)
//! whose controls can be edited while a session owns a clone of it.
//!
//! # Recording presenter
//!
//! [`RecordingPresenter`] records every presenter call, simulates the class
//! and error-text changes a browser presenter would make, and verifies
//! expectations built from [`CallMatcher`]s.
//!
//! ```rust,ignore
//! use formcheck_testing::{CallKind, CallMatcher, MockControl, MockForm, RecordingPresenter};
//!
//! let form = MockForm::new();
//! let user = form.add(MockControl::text().name("user").attr("required", ""));
//! let presenter = RecordingPresenter::new();
//!
//! presenter
//!     .expect(CallMatcher::new().kind(CallKind::Error).field(user))
//!     .once();
//!
//! let mut session = Session::new(form.clone(), presenter.clone(), FormConfig::default());
//! session.validate_all(ValidationMode::Report);
//! presenter.verify();
//! ```

pub mod expectation;
pub mod form;
pub mod matcher;
pub mod presenter;

pub use expectation::{Expectation, Times};
pub use form::{MockControl, MockForm};
pub use matcher::CallMatcher;
pub use presenter::{CallKind, ErrorText, ExpectationBuilder, PresenterCall, RecordingPresenter, MESSAGE_SEPARATOR};
