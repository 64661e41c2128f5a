//! The session controller.
//!
//! A [`Session`] binds one form (through its [`FormInspector`]) to a field
//! table resolved at construction, runs validation on request and forwards
//! every decision to its [`Presenter`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use formcheck_core::prelude::*;
//!
//! let mut session = Session::builder(form)
//!     .config(FormConfig::new().with_locale("fr"))
//!     .validator("even", ValidatorDef::new(|v, _, _| v.len() % 2 == 0))
//!     .build();
//!
//! if !session.validate_all(ValidationMode::Report) {
//!     let report = session.report();
//! }
//! ```

use crate::catalog::MessageCatalog;
use crate::config::FormConfig;
use crate::descriptor::{ValidatorDef, ValidatorDescriptor};
use crate::engine;
use crate::error::{FieldErrors, ValidationReport};
use crate::field::{Field, FieldState};
use crate::inspector::{ElementId, FormInspector, LiveEvent};
use crate::presenter::{NullPresenter, Presenter};
use crate::registry::ValidatorRegistry;
use crate::resolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Whether a validation call renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Forward every decision to the presenter
    #[default]
    Report,
    /// Update field state only
    Silent,
}

/// Builder for [`Session`].
pub struct SessionBuilder<I, P = NullPresenter> {
    inspector: I,
    presenter: P,
    config: FormConfig,
    catalog: Option<MessageCatalog>,
    validators: Vec<(String, ValidatorDef)>,
}

impl<I: FormInspector> SessionBuilder<I> {
    fn new(inspector: I) -> Self {
        Self {
            inspector,
            presenter: NullPresenter,
            config: FormConfig::default(),
            catalog: None,
            validators: Vec::new(),
        }
    }
}

impl<I: FormInspector, P: Presenter> SessionBuilder<I, P> {
    /// Render results through `presenter`.
    pub fn presenter<Q: Presenter>(self, presenter: Q) -> SessionBuilder<I, Q> {
        SessionBuilder {
            inspector: self.inspector,
            presenter,
            config: self.config,
            catalog: self.catalog,
            validators: self.validators,
        }
    }

    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the built-in message catalog.
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Register a validator before the form's attributes are resolved.
    pub fn validator(mut self, name: impl Into<String>, def: ValidatorDef) -> Self {
        self.validators.push((name.into(), def));
        self
    }

    pub fn build(self) -> Session<I, P> {
        let catalog = self.catalog.unwrap_or_else(MessageCatalog::builtin);
        let mut registry = ValidatorRegistry::with_builtins(catalog, self.config.locale.as_str());
        for (name, def) in self.validators {
            registry.register(name, def);
        }

        let mut session = Session {
            inspector: self.inspector,
            presenter: self.presenter,
            config: self.config,
            registry,
            fields: Vec::new(),
            index: HashMap::new(),
            next_local: 0,
        };
        session.track();
        session
    }
}

/// Live binding between one form and its resolved fields.
pub struct Session<I: FormInspector, P: Presenter = NullPresenter> {
    inspector: I,
    presenter: P,
    config: FormConfig,
    registry: ValidatorRegistry,
    fields: Vec<Field>,
    index: HashMap<ElementId, usize>,
    next_local: usize,
}

impl<I: FormInspector> Session<I> {
    /// Start building a session over `inspector`.
    pub fn builder(inspector: I) -> SessionBuilder<I> {
        SessionBuilder::new(inspector)
    }
}

impl<I: FormInspector, P: Presenter> Session<I, P> {
    /// Bind a form with the built-in validators and catalog.
    pub fn new(inspector: I, presenter: P, config: FormConfig) -> Self {
        SessionBuilder::new(inspector)
            .presenter(presenter)
            .config(config)
            .build()
    }

    fn track(&mut self) {
        self.fields.clear();
        self.index.clear();

        for element in self.inspector.controls() {
            if self.index.contains_key(&element) {
                continue;
            }
            let kind = self.inspector.kind(element);
            if !kind.is_candidate() || !self.inspector.is_enabled(element) {
                crate::trace_trace!(element = %element, "control not tracked");
                continue;
            }
            let resolved = resolver::resolve(&self.inspector.attributes(element), &self.registry);
            self.index.insert(element, self.fields.len());
            self.fields.push(Field::new(element, kind, resolved));
        }

        crate::trace_debug!(fields = self.fields.len(), "field table built");
    }

    fn position(&self, element: ElementId, operation: &'static str) -> Option<usize> {
        let position = self.index.get(&element).copied();
        if position.is_none() {
            crate::trace_warn!(element = %element, operation, "element is not a tracked field");
        }
        position
    }

    fn run(&mut self, position: usize, mode: ValidationMode) -> bool {
        let outcome = engine::evaluate_field(&self.fields[position], &self.inspector, &self.config.locale);
        let field = &mut self.fields[position];
        crate::trace_debug!(
            element = %field.element,
            valid = outcome.valid,
            errors = outcome.errors.len(),
            "field validated"
        );
        field.errors = Some(outcome.errors);

        if mode == ValidationMode::Report {
            self.present(position);
        }
        outcome.valid
    }

    fn present(&mut self, position: usize) {
        let Self {
            fields,
            presenter,
            config,
            ..
        } = self;
        let field = &mut fields[position];
        let element = field.element;
        let targets = *field
            .presentation
            .get_or_insert_with(|| presenter.locate(element, config));

        match field.errors.as_deref() {
            None => presenter.clear(element, &targets, config),
            Some([]) => presenter.apply_success(element, &targets, config),
            Some(messages) => presenter.apply_error(element, &targets, messages, config),
        }
    }

    /// Validate every field in document order. Returns `true` when all pass.
    pub fn validate_all(&mut self, mode: ValidationMode) -> bool {
        let mut valid = true;
        for position in 0..self.fields.len() {
            valid &= self.run(position, mode);
        }
        valid
    }

    /// Validate one field; `None` when the element is not tracked.
    pub fn validate_one(&mut self, element: ElementId, mode: ValidationMode) -> Option<bool> {
        let position = self.position(element, "validate_one")?;
        Some(self.run(position, mode))
    }

    /// Validate the given fields in the given order. Untracked elements are
    /// skipped; an empty subset is valid.
    pub fn validate_subset<E>(&mut self, elements: E, mode: ValidationMode) -> bool
    where
        E: IntoIterator<Item = ElementId>,
    {
        let mut valid = true;
        for element in elements {
            if let Some(position) = self.position(element, "validate_subset") {
                valid &= self.run(position, mode);
            }
        }
        valid
    }

    /// Every field currently invalid, with its messages.
    pub fn errors(&self) -> Vec<FieldErrors> {
        self.fields
            .iter()
            .filter(|field| field.state() == FieldState::Invalid)
            .map(|field| FieldErrors::new(field.element, field.errors().to_vec()))
            .collect()
    }

    /// Current messages of one field.
    pub fn field_errors(&self, element: ElementId) -> Option<&[String]> {
        let position = self.position(element, "field_errors")?;
        Some(self.fields[position].errors())
    }

    /// Serializable snapshot of the invalid fields.
    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_fields(self.errors())
    }

    /// Append an external message to a field and render the error state
    /// without running any validator. Returns `false` for untracked elements.
    pub fn add_error(&mut self, element: ElementId, message: impl Into<String>) -> bool {
        let Some(position) = self.position(element, "add_error") else {
            return false;
        };
        self.fields[position].push_error(message.into());
        self.present(position);
        true
    }

    /// Register a validator on this session's registry.
    ///
    /// Fields already resolved keep their validators until [`rescan`].
    ///
    /// [`rescan`]: Session::rescan
    pub fn add_validator(&mut self, name: impl Into<String>, def: ValidatorDef) {
        self.registry.register(name, def);
    }

    /// Attach an anonymous validator to one field. Returns `false` for
    /// untracked elements.
    pub fn add_field_validator(&mut self, element: ElementId, def: ValidatorDef) -> bool {
        let Some(position) = self.position(element, "add_field_validator") else {
            return false;
        };
        self.next_local += 1;
        let name = format!("field-validator-{}", self.next_local);
        let descriptor = self.registry.describe(name, def);
        crate::trace_debug!(
            element = %element,
            validator = descriptor.name(),
            "attaching field validator"
        );
        self.fields[position].attach(Arc::new(descriptor));
        true
    }

    /// Return every field to the unvalidated state and clear whatever the
    /// presenter rendered.
    pub fn reset(&mut self) {
        let Self {
            fields,
            presenter,
            config,
            ..
        } = self;
        for field in fields.iter_mut() {
            field.errors = None;
            if let Some(targets) = field.presentation.take() {
                presenter.clear(field.element, &targets, config);
            }
        }
        crate::trace_debug!(fields = fields.len(), "session reset");
    }

    /// Re-read the form's controls and resolve them again against the
    /// current registry. Field validators survive for elements that are
    /// still present; every field ends up unvalidated.
    pub fn rescan(&mut self) {
        self.reset();
        let mut local: HashMap<ElementId, Vec<Arc<ValidatorDescriptor>>> = self
            .fields
            .drain(..)
            .filter(|field| !field.local.is_empty())
            .map(|field| (field.element, field.local))
            .collect();

        self.track();
        for field in &mut self.fields {
            for descriptor in local.remove(&field.element).unwrap_or_default() {
                field.attach(descriptor);
            }
        }
    }

    /// Reset the form and hand back the inspector and presenter.
    pub fn destroy(mut self) -> (I, P) {
        self.reset();
        crate::trace_debug!("session destroyed");
        (self.inspector, self.presenter)
    }

    /// The event the host should forward for live validation of `element`,
    /// `None` when live validation is off or the element is not tracked.
    pub fn live_event(&self, element: ElementId) -> Option<LiveEvent> {
        if !self.config.live_validation {
            return None;
        }
        let position = self.index.get(&element)?;
        Some(self.fields[*position].kind.live_event())
    }

    /// Forward a host event. Validates and renders the field when live
    /// validation is on and `event` is the one the field listens to.
    pub fn handle_event(&mut self, element: ElementId, event: LiveEvent) -> Option<bool> {
        if !self.config.live_validation {
            return None;
        }
        let position = self.position(element, "handle_event")?;
        if self.fields[position].kind.live_event() != event {
            return None;
        }
        Some(self.run(position, ValidationMode::Report))
    }

    pub fn state(&self, element: ElementId) -> Option<FieldState> {
        self.field(element).map(Field::state)
    }

    pub fn field(&self, element: ElementId) -> Option<&Field> {
        self.index.get(&element).map(|position| &self.fields[*position])
    }

    /// Tracked fields in document order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn inspector(&self) -> &I {
        &self.inspector
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

impl<I: FormInspector, P: Presenter> fmt::Debug for Session<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}
