//! The Presenter contract.

use crate::config::FormConfig;
use crate::inspector::ElementId;

/// Where a field's visual state is rendered.
///
/// Resolved once per field by [`Presenter::locate`] and cached by the session
/// until the next reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PresentationTargets {
    /// Element receiving the error/success classes (`config.class_to`)
    pub class_target: Option<ElementId>,
    /// Element whose text holds the joined error messages
    pub error_text: Option<ElementId>,
}

/// Visual feedback for validation results.
///
/// The session calls the presenter after every non-silent validation
/// decision, after [`Session::add_error`](crate::Session::add_error) and on
/// reset. Implementations own all class toggling and error-node creation.
pub trait Presenter {
    /// Find (or create) the presentation targets of a field.
    fn locate(&mut self, field: ElementId, config: &FormConfig) -> PresentationTargets;

    /// Render the error state with the field's messages in priority order.
    fn apply_error(
        &mut self,
        field: ElementId,
        targets: &PresentationTargets,
        messages: &[String],
        config: &FormConfig,
    );

    /// Render the success state.
    fn apply_success(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig);

    /// Remove every class and message the presenter applied.
    fn clear(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig);
}

/// Presenter that renders nothing, for headless validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn locate(&mut self, _field: ElementId, _config: &FormConfig) -> PresentationTargets {
        PresentationTargets::default()
    }

    fn apply_error(
        &mut self,
        _field: ElementId,
        _targets: &PresentationTargets,
        _messages: &[String],
        _config: &FormConfig,
    ) {
    }

    fn apply_success(&mut self, _field: ElementId, _targets: &PresentationTargets, _config: &FormConfig) {}

    fn clear(&mut self, _field: ElementId, _targets: &PresentationTargets, _config: &FormConfig) {}
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn locate(&mut self, field: ElementId, config: &FormConfig) -> PresentationTargets {
        (**self).locate(field, config)
    }

    fn apply_error(
        &mut self,
        field: ElementId,
        targets: &PresentationTargets,
        messages: &[String],
        config: &FormConfig,
    ) {
        (**self).apply_error(field, targets, messages, config)
    }

    fn apply_success(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig) {
        (**self).apply_success(field, targets, config)
    }

    fn clear(&mut self, field: ElementId, targets: &PresentationTargets, config: &FormConfig) {
        (**self).clear(field, targets, config)
    }
}
