use formcheck_core::{Attribute, ControlKind, ElementId, FormInspector};
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// An in-memory form
///
/// Cloning a `MockForm` yields another handle to the same controls, so a test
/// can hand one clone to a [`Session`](formcheck_core::Session) and keep
/// editing values through the other.
#[derive(Debug, Clone, Default)]
pub struct MockForm {
    state: Arc<Mutex<FormState>>,
}

#[derive(Debug, Default)]
struct FormState {
    controls: Vec<StoredControl>,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct StoredControl {
    id: ElementId,
    control: MockControl,
}

/// A control description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MockControl {
    pub(crate) kind: ControlKind,
    pub(crate) name: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
}

impl Default for MockControl {
    fn default() -> Self {
        Self {
            kind: ControlKind::input("text"),
            name: None,
            attributes: Vec::new(),
            value: String::new(),
            checked: false,
            disabled: false,
        }
    }
}

impl MockControl {
    /// `<input type="...">`
    pub fn input(input_type: &str) -> Self {
        let kind = ControlKind::input(input_type);
        let value = if kind.is_grouped() { "on" } else { "" };
        Self {
            attributes: vec![("type".to_string(), kind.input_type().unwrap_or("text").to_string())],
            kind,
            value: value.to_string(),
            ..Self::default()
        }
    }

    /// `<input type="text">`
    pub fn text() -> Self {
        Self::input("text")
    }

    /// `<input type="checkbox">`
    pub fn checkbox() -> Self {
        Self::input("checkbox")
    }

    /// `<input type="radio">`
    pub fn radio() -> Self {
        Self::input("radio")
    }

    /// `<select>`
    pub fn select() -> Self {
        Self {
            kind: ControlKind::Select,
            ..Self::default()
        }
    }

    /// `<textarea>`
    pub fn textarea() -> Self {
        Self {
            kind: ControlKind::TextArea,
            ..Self::default()
        }
    }

    /// Set the `name` attribute
    pub fn name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.attributes.push(("name".to_string(), name.clone()));
        self.name = Some(name);
        self
    }

    /// Add an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Set the current value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Mark a checkbox or radio as checked
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Mark the control as disabled
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl MockForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from a JSON array of controls
    ///
    /// ```json
    /// [
    ///   { "kind": { "tag": "input", "input_type": "email" }, "name": "mail",
    ///     "attributes": [["required", ""]] }
    /// ]
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let controls: Vec<MockControl> = serde_json::from_str(json)?;
        let form = Self::new();
        for control in controls {
            form.add(control);
        }
        Ok(form)
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_control<T>(&self, element: ElementId, f: impl FnOnce(&mut MockControl) -> T) -> Option<T> {
        let mut state = self.state();
        state
            .controls
            .iter_mut()
            .find(|c| c.id == element)
            .map(|c| f(&mut c.control))
    }

    /// Append a control and return its handle
    pub fn add(&self, control: MockControl) -> ElementId {
        let mut state = self.state();
        state.next_id += 1;
        let id = ElementId(state.next_id);
        state.controls.push(StoredControl { id, control });
        id
    }

    /// Remove a control; returns `false` if it was not present
    pub fn remove(&self, element: ElementId) -> bool {
        let mut state = self.state();
        let before = state.controls.len();
        state.controls.retain(|c| c.id != element);
        state.controls.len() != before
    }

    /// Change the current value, as typing would
    pub fn set_value(&self, element: ElementId, value: impl Into<String>) {
        let value = value.into();
        self.with_control(element, |c| c.value = value);
    }

    /// Check or uncheck a checkbox or radio
    ///
    /// Checking a radio unchecks the other radios of its group.
    pub fn set_checked(&self, element: ElementId, checked: bool) {
        let mut state = self.state();
        let Some(target) = state.controls.iter().find(|c| c.id == element).cloned() else {
            return;
        };
        for stored in state.controls.iter_mut() {
            if stored.id == element {
                stored.control.checked = checked;
            } else if checked
                && target.control.kind.is_radio()
                && stored.control.kind.is_radio()
                && stored.control.name.is_some()
                && stored.control.name == target.control.name
            {
                stored.control.checked = false;
            }
        }
    }

    /// Enable or disable a control
    pub fn set_enabled(&self, element: ElementId, enabled: bool) {
        self.with_control(element, |c| c.disabled = !enabled);
    }

    /// Current value of a control
    pub fn value_of(&self, element: ElementId) -> Option<String> {
        self.with_control(element, |c| c.value.clone())
    }

    /// Number of controls, including hidden and disabled ones
    pub fn len(&self) -> usize {
        self.state().controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().controls.is_empty()
    }
}

impl FormInspector for MockForm {
    fn controls(&self) -> Vec<ElementId> {
        self.state()
            .controls
            .iter()
            .filter(|c| c.control.kind.is_candidate())
            .map(|c| c.id)
            .collect()
    }

    fn kind(&self, element: ElementId) -> ControlKind {
        self.with_control(element, |c| c.kind.clone())
            .unwrap_or_else(|| ControlKind::input("text"))
    }

    fn attributes(&self, element: ElementId) -> Vec<Attribute> {
        self.with_control(element, |c| {
            c.attributes
                .iter()
                .map(|(name, value)| Attribute::new(name.as_str(), value.as_str()))
                .collect()
        })
        .unwrap_or_default()
    }

    fn value(&self, element: ElementId) -> String {
        self.value_of(element).unwrap_or_default()
    }

    fn group_checked_count(&self, element: ElementId) -> usize {
        let state = self.state();
        let Some(target) = state.controls.iter().find(|c| c.id == element) else {
            return 0;
        };
        match &target.control.name {
            Some(name) => state
                .controls
                .iter()
                .filter(|c| c.control.checked && c.control.name.as_ref() == Some(name))
                .count(),
            None => usize::from(target.control.checked),
        }
    }

    fn is_enabled(&self, element: ElementId) -> bool {
        self.with_control(element, |c| !c.disabled).unwrap_or(false)
    }
}
