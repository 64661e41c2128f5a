//! Field context bound to every validator call.

use crate::inspector::{ControlKind, ElementId, FormInspector};
use std::fmt;

/// What a validator may know about the control it is checking besides its
/// value and parameters.
///
/// Group counts are queried from the inspector on demand, so validators that
/// never look at them cost nothing.
#[derive(Clone, Copy)]
pub struct FieldContext<'a> {
    element: ElementId,
    kind: &'a ControlKind,
    inspector: &'a dyn FormInspector,
}

impl<'a> FieldContext<'a> {
    /// Bind a context to one control.
    pub fn new(element: ElementId, kind: &'a ControlKind, inspector: &'a dyn FormInspector) -> Self {
        Self {
            element,
            kind,
            inspector,
        }
    }

    /// The control being validated.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Element type tag of the control.
    pub fn kind(&self) -> &ControlKind {
        self.kind
    }

    /// Number of checked inputs sharing the control's `name`.
    pub fn group_checked_count(&self) -> usize {
        self.inspector.group_checked_count(self.element)
    }
}

impl fmt::Debug for FieldContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldContext")
            .field("element", &self.element)
            .field("kind", &self.kind)
            .finish()
    }
}
