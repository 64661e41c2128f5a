use super::expectation::{Expectation, Times};
use super::matcher::CallMatcher;
use formcheck_core::{ElementId, FormConfig, PresentationTargets, Presenter};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

/// Separator between messages in the rendered error text
pub const MESSAGE_SEPARATOR: &str = "<br/>";

/// Id offset of the simulated class target (the field's `classTo` ancestor)
const CLASS_TARGET_BASE: u64 = 1 << 32;
/// Id offset of the simulated error text node
const ERROR_TEXT_BASE: u64 = 2 << 32;

/// What kind of presenter call was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Locate,
    Error,
    Success,
    Clear,
}

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterCall {
    pub kind: CallKind,
    pub field: ElementId,
    /// Messages passed to `apply_error`, empty for other calls
    pub messages: Vec<String>,
}

/// Simulated error text node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorText {
    pub text: String,
    pub visible: bool,
}

/// A presenter that records every call and simulates the DOM changes a
/// browser presenter would make
///
/// Clones share state, so a test can keep one handle after moving another
/// into a [`Session`](formcheck_core::Session).
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    state: Arc<Mutex<PresenterState>>,
    without_error_text: bool,
}

#[derive(Debug, Default)]
struct PresenterState {
    calls: Vec<PresenterCall>,
    classes: HashMap<ElementId, BTreeSet<String>>,
    error_text: HashMap<ElementId, ErrorText>,
    expectations: Vec<Expectation>,
}

impl RecordingPresenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate forms that have no `errorTextParent` element: located
    /// targets carry no error text node
    pub fn without_error_text(mut self) -> Self {
        self.without_error_text = true;
        self
    }

    fn state(&self) -> MutexGuard<'_, PresenterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Id of the simulated class target of a field
    pub fn class_target_of(field: ElementId) -> ElementId {
        ElementId(CLASS_TARGET_BASE + field.0)
    }

    /// Id of the simulated error text node of a field
    pub fn error_text_of(field: ElementId) -> ElementId {
        ElementId(ERROR_TEXT_BASE + field.0)
    }

    /// Every call, in order
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.state().calls.clone()
    }

    /// Calls concerning one field, in order
    pub fn calls_for(&self, field: ElementId) -> Vec<PresenterCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.field == field)
            .cloned()
            .collect()
    }

    /// Number of calls accepted by a matcher
    pub fn count(&self, matcher: &CallMatcher) -> usize {
        self.state().calls.iter().filter(|c| matcher.matches(c)).count()
    }

    /// Classes currently on a field's class target
    pub fn classes(&self, field: ElementId) -> Vec<String> {
        self.state()
            .classes
            .get(&Self::class_target_of(field))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, field: ElementId, class: &str) -> bool {
        self.state()
            .classes
            .get(&Self::class_target_of(field))
            .is_some_and(|set| set.contains(class))
    }

    /// Visible error text of a field, `None` when hidden or never rendered
    pub fn error_text(&self, field: ElementId) -> Option<String> {
        self.state()
            .error_text
            .get(&Self::error_text_of(field))
            .filter(|node| node.visible)
            .map(|node| node.text.clone())
    }

    /// Forget recorded calls, keeping the simulated DOM
    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Add an expectation checked by [`verify`](Self::verify)
    pub fn expect(&self, matcher: CallMatcher) -> ExpectationBuilder {
        ExpectationBuilder {
            presenter: self.state.clone(),
            expectation: Some(Expectation::new(matcher)),
        }
    }

    /// Verify that all expectations were met
    pub fn verify(&self) {
        let state = self.state();
        for exp in &state.expectations {
            let count = state.calls.iter().filter(|c| exp.matcher.matches(c)).count();
            if let Err(reason) = exp.times.check(count) {
                panic!("Expectation {:?} {}", exp.matcher, reason);
            }
        }
    }

    fn record(&self, kind: CallKind, field: ElementId, messages: &[String]) {
        self.state().calls.push(PresenterCall {
            kind,
            field,
            messages: messages.to_vec(),
        });
    }

    fn set_classes(&self, targets: &PresentationTargets, add: Option<&str>, remove: &[&str]) {
        let Some(target) = targets.class_target else {
            return;
        };
        let mut state = self.state();
        let classes = state.classes.entry(target).or_default();
        for class in remove {
            classes.remove(*class);
        }
        if let Some(class) = add {
            classes.insert(class.to_string());
        }
    }

    fn set_text(&self, targets: &PresentationTargets, text: Option<String>) {
        let Some(node) = targets.error_text else {
            return;
        };
        let mut state = self.state();
        let entry = state.error_text.entry(node).or_default();
        match text {
            Some(text) => {
                entry.text = text;
                entry.visible = true;
            }
            None => {
                entry.text.clear();
                entry.visible = false;
            }
        }
    }
}

impl Presenter for RecordingPresenter {
    fn locate(&mut self, field: ElementId, _config: &FormConfig) -> PresentationTargets {
        self.record(CallKind::Locate, field, &[]);
        PresentationTargets {
            class_target: Some(Self::class_target_of(field)),
            error_text: (!self.without_error_text).then(|| Self::error_text_of(field)),
        }
    }

    fn apply_error(
        &mut self,
        field: ElementId,
        targets: &PresentationTargets,
        messages: &[String],
        config: &FormConfig,
    ) {
        self.record(CallKind::Error, field, messages);
        self.set_classes(targets, Some(config.error_class.as_str()), &[config.success_class.as_str()]);
        self.set_text(targets, Some(messages.join(MESSAGE_SEPARATOR)));
    }

    fn apply_success(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig) {
        self.record(CallKind::Success, field, &[]);
        self.set_classes(targets, Some(config.success_class.as_str()), &[config.error_class.as_str()]);
        self.set_text(targets, None);
    }

    fn clear(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig) {
        self.record(CallKind::Clear, field, &[]);
        self.set_classes(
            targets,
            None,
            &[config.error_class.as_str(), config.success_class.as_str()],
        );
        self.set_text(targets, None);
    }
}

pub struct ExpectationBuilder {
    presenter: Arc<Mutex<PresenterState>>,
    expectation: Option<Expectation>,
}

impl ExpectationBuilder {
    pub fn times(mut self, n: usize) -> Self {
        if let Some(exp) = self.expectation.as_mut() {
            exp.times = Times::Exactly(n);
        }
        self
    }

    pub fn once(mut self) -> Self {
        if let Some(exp) = self.expectation.as_mut() {
            exp.times = Times::Once;
        }
        self
    }

    pub fn at_least_once(mut self) -> Self {
        if let Some(exp) = self.expectation.as_mut() {
            exp.times = Times::AtLeast(1);
        }
        self
    }

    pub fn never(mut self) -> Self {
        if let Some(exp) = self.expectation.as_mut() {
            exp.times = Times::Exactly(0);
        }
        self
    }
}

impl Drop for ExpectationBuilder {
    fn drop(&mut self) {
        if let Some(exp) = self.expectation.take() {
            let mut state = self
                .presenter
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            state.expectations.push(exp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(presenter: &mut RecordingPresenter, field: ElementId) -> PresentationTargets {
        presenter.locate(field, &FormConfig::default())
    }

    #[test]
    fn error_then_success_swaps_classes() {
        let config = FormConfig::default();
        let mut presenter = RecordingPresenter::new();
        let field = ElementId(1);
        let targets = located(&mut presenter, field);

        presenter.apply_error(field, &targets, &["a".to_string(), "b".to_string()], &config);
        assert_eq!(presenter.classes(field), vec!["has-danger".to_string()]);
        assert_eq!(presenter.error_text(field), Some("a<br/>b".to_string()));

        presenter.apply_success(field, &targets, &config);
        assert_eq!(presenter.classes(field), vec!["has-success".to_string()]);
        assert_eq!(presenter.error_text(field), None);

        presenter.clear(field, &targets, &config);
        assert!(presenter.classes(field).is_empty());

        let kinds: Vec<CallKind> = presenter.calls().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![CallKind::Locate, CallKind::Error, CallKind::Success, CallKind::Clear]
        );
    }

    #[test]
    fn configured_class_names_are_used() {
        let config = FormConfig::default()
            .with_error_class("is-invalid")
            .with_success_class("is-valid");
        let mut presenter = RecordingPresenter::new();
        let field = ElementId(4);
        let targets = presenter.locate(field, &config);
        presenter.apply_error(field, &targets, &["x".to_string()], &config);
        assert!(presenter.has_class(field, "is-invalid"));
        assert!(!presenter.has_class(field, "has-danger"));
    }

    #[test]
    fn missing_error_text_parent() {
        let config = FormConfig::default();
        let mut presenter = RecordingPresenter::new().without_error_text();
        let field = ElementId(2);
        let targets = located(&mut presenter, field);
        assert!(targets.error_text.is_none());
        presenter.apply_error(field, &targets, &["x".to_string()], &config);
        assert!(presenter.has_class(field, "has-danger"));
        assert_eq!(presenter.error_text(field), None);
    }

    #[test]
    fn clones_share_recordings() {
        let presenter = RecordingPresenter::new();
        let mut handle = presenter.clone();
        located(&mut handle, ElementId(9));
        assert_eq!(presenter.calls_for(ElementId(9)).len(), 1);
        presenter.clear_calls();
        assert!(handle.calls().is_empty());
    }

    #[test]
    fn expectations_are_verified() {
        let mut presenter = RecordingPresenter::new();
        presenter
            .expect(CallMatcher::new().kind(CallKind::Locate))
            .times(2);
        presenter.expect(CallMatcher::new().kind(CallKind::Error)).never();
        located(&mut presenter, ElementId(1));
        located(&mut presenter, ElementId(2));
        presenter.verify();
    }

    #[test]
    #[should_panic(expected = "expected 1 call, got 0")]
    fn unmet_expectation_panics() {
        let presenter = RecordingPresenter::new();
        presenter.expect(CallMatcher::new().field(ElementId(1))).once();
        presenter.verify();
    }
}
