//! Tracked fields and their validation state.

use crate::descriptor::ValidatorDescriptor;
use crate::inspector::{ControlKind, ElementId};
use crate::presenter::PresentationTargets;
use crate::resolver::{MessageOverrides, Parameters, ResolvedField};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Validation state of a field, derived from its stored errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldState {
    /// Never validated since construction or the last reset
    Unvalidated,
    /// Last evaluation passed
    Valid,
    /// Last evaluation failed, or an error was added
    Invalid,
}

/// One tracked control with its resolved validators and last result.
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) element: ElementId,
    pub(crate) kind: ControlKind,
    pub(crate) validators: Vec<Arc<ValidatorDescriptor>>,
    pub(crate) parameters: Parameters,
    pub(crate) messages: MessageOverrides,
    pub(crate) errors: Option<Vec<String>>,
    pub(crate) presentation: Option<PresentationTargets>,
    /// Validators attached directly to this field, kept across rescans
    pub(crate) local: Vec<Arc<ValidatorDescriptor>>,
}

impl Field {
    pub(crate) fn new(element: ElementId, kind: ControlKind, resolved: ResolvedField) -> Self {
        Self {
            element,
            kind,
            validators: resolved.validators,
            parameters: resolved.parameters,
            messages: resolved.messages,
            errors: None,
            presentation: None,
            local: Vec::new(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Attached validators in evaluation order.
    pub fn validators(&self) -> &[Arc<ValidatorDescriptor>] {
        &self.validators
    }

    /// Names of the attached validators in evaluation order.
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn messages(&self) -> &MessageOverrides {
        &self.messages
    }

    /// Messages of the last evaluation, empty when unvalidated or valid.
    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn state(&self) -> FieldState {
        match self.errors.as_deref() {
            None => FieldState::Unvalidated,
            Some([]) => FieldState::Valid,
            Some(_) => FieldState::Invalid,
        }
    }

    /// Cached presentation targets, if the presenter was consulted.
    pub fn presentation(&self) -> Option<PresentationTargets> {
        self.presentation
    }

    /// Attach a field-local validator, keeping the priority order stable.
    pub(crate) fn attach(&mut self, descriptor: Arc<ValidatorDescriptor>) {
        self.local.push(Arc::clone(&descriptor));
        self.validators.push(descriptor);
        self.validators
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Append a message, turning the field invalid.
    pub(crate) fn push_error(&mut self, message: String) {
        self.errors.get_or_insert_with(Vec::new).push(message);
    }
}
