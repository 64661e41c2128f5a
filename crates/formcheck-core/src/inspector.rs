//! The Form Inspector contract.
//!
//! formcheck never touches a DOM. The host implements [`FormInspector`] over
//! whatever tree it owns (web-sys nodes, a virtual DOM, a test fixture) and
//! hands the session opaque [`ElementId`] handles plus attribute, value and
//! checkbox-group queries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a form control, minted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One attribute of a control as written in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The event a host should forward for live validation of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveEvent {
    /// Fired on every keystroke / value edit
    Input,
    /// Fired when a choice is committed (checkbox, radio, select)
    Change,
}

/// Element type tag of a control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum ControlKind {
    /// `<input>` with its lower-cased `type` attribute (`text` when absent)
    Input { input_type: String },
    /// `<select>`
    Select,
    /// `<textarea>`
    TextArea,
}

impl ControlKind {
    /// An `<input>` of the given type.
    pub fn input(input_type: impl Into<String>) -> Self {
        let input_type = input_type.into().trim().to_ascii_lowercase();
        Self::Input {
            input_type: if input_type.is_empty() {
                "text".to_string()
            } else {
                input_type
            },
        }
    }

    /// The `type` of an `<input>`, `None` for selects and textareas.
    pub fn input_type(&self) -> Option<&str> {
        match self {
            ControlKind::Input { input_type } => Some(input_type),
            _ => None,
        }
    }

    pub fn is_checkbox(&self) -> bool {
        self.input_type() == Some("checkbox")
    }

    pub fn is_radio(&self) -> bool {
        self.input_type() == Some("radio")
    }

    /// Checkboxes and radios are validated as a group sharing one `name`.
    pub fn is_grouped(&self) -> bool {
        self.is_checkbox() || self.is_radio()
    }

    /// Hidden and submit inputs never take part in validation.
    pub fn is_candidate(&self) -> bool {
        !matches!(self.input_type(), Some(t) if t.starts_with("hidden") || t.starts_with("submit"))
    }

    /// The event that should trigger live validation for this kind.
    pub fn live_event(&self) -> LiveEvent {
        match self {
            ControlKind::Select => LiveEvent::Change,
            kind if kind.is_grouped() => LiveEvent::Change,
            _ => LiveEvent::Input,
        }
    }
}

/// Read access to the controls of one form.
///
/// Implementations report controls in document order. Every query is live:
/// `value` and `group_checked_count` are called at evaluation time, never
/// cached by the session.
pub trait FormInspector {
    /// Candidate controls: inputs (except hidden/submit), selects and
    /// textareas that descend from the form.
    fn controls(&self) -> Vec<ElementId>;

    /// Element type tag of a control.
    fn kind(&self, element: ElementId) -> ControlKind;

    /// Attributes of a control in markup order.
    fn attributes(&self, element: ElementId) -> Vec<Attribute>;

    /// Current value of a control.
    fn value(&self, element: ElementId) -> String;

    /// Number of checked inputs in the form sharing this control's `name`.
    fn group_checked_count(&self, element: ElementId) -> usize;

    /// Disabled controls are not tracked.
    fn is_enabled(&self, _element: ElementId) -> bool {
        true
    }
}
