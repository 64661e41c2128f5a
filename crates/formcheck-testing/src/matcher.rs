use super::presenter::{CallKind, PresenterCall};
use formcheck_core::ElementId;

/// Matcher for recorded presenter calls
#[derive(Debug, Clone, Default)]
pub struct CallMatcher {
    pub(crate) kind: Option<CallKind>,
    pub(crate) field: Option<ElementId>,
    pub(crate) messages: Option<Vec<String>>,
    pub(crate) containing: Vec<String>,
}

impl CallMatcher {
    /// Create a new matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a specific call kind
    pub fn kind(mut self, kind: CallKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Match calls for one field
    pub fn field(mut self, field: ElementId) -> Self {
        self.field = Some(field);
        self
    }

    /// Match the exact message list
    pub fn messages<S: Into<String>>(mut self, messages: impl IntoIterator<Item = S>) -> Self {
        self.messages = Some(messages.into_iter().map(Into::into).collect());
        self
    }

    /// Match calls carrying a message
    pub fn containing(mut self, message: impl Into<String>) -> Self {
        self.containing.push(message.into());
        self
    }

    /// Check if the matcher matches a call
    pub fn matches(&self, call: &PresenterCall) -> bool {
        if let Some(kind) = self.kind {
            if kind != call.kind {
                return false;
            }
        }

        if let Some(field) = self.field {
            if field != call.field {
                return false;
            }
        }

        if let Some(expected) = &self.messages {
            if expected != &call.messages {
                return false;
            }
        }

        self.containing
            .iter()
            .all(|message| call.messages.contains(message))
    }
}
