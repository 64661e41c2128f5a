//! Field evaluation.
//!
//! Validators run in priority order against the live value. A failure
//! records a message and, for halting validators, skips everything after it.
//! Success never stops the walk.

use crate::context::FieldContext;
use crate::descriptor::{Message, ValidatorDescriptor};
use crate::field::Field;
use crate::inspector::FormInspector;
use crate::template;

/// Result of one field evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// `true` when no validator failed
    pub valid: bool,
    /// Failure messages in evaluation order
    pub errors: Vec<String>,
}

/// Evaluate every validator of a field against its current value.
pub fn evaluate_field(field: &Field, inspector: &dyn FormInspector, locale: &str) -> Outcome {
    let value = inspector.value(field.element);
    let ctx = FieldContext::new(field.element, &field.kind, inspector);
    let mut errors = Vec::new();

    for descriptor in &field.validators {
        let params = field.parameters.get(descriptor.name());
        let passed = descriptor.evaluate(&value, params, &ctx);
        crate::trace_trace!(
            element = %field.element,
            validator = descriptor.name(),
            passed,
            "validator evaluated"
        );
        if passed {
            continue;
        }

        errors.push(failure_message(field, descriptor, &value, locale));
        if descriptor.halts_on_failure() {
            break;
        }
    }

    Outcome {
        valid: errors.is_empty(),
        errors,
    }
}

fn failure_message(field: &Field, descriptor: &ValidatorDescriptor, value: &str, locale: &str) -> String {
    let name = descriptor.name();
    let arguments = field.parameters.arguments(name, value);

    if let Some(Message::Computed(compute)) = descriptor.message() {
        return compute(value, &arguments);
    }

    let template = field.messages.get(name, locale).or(match descriptor.message() {
        Some(Message::Template(template)) => Some(template.as_str()),
        _ => None,
    });

    match template {
        Some(template) => template::expand(template, &arguments),
        None => descriptor.fallback_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ValidatorDef;
    use crate::inspector::{Attribute, ControlKind, ElementId};
    use crate::registry::ValidatorRegistry;
    use crate::resolver::resolve;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Controls {
        values: HashMap<ElementId, String>,
        checked: usize,
    }

    impl Controls {
        fn with_value(value: &str) -> Self {
            let mut values = HashMap::new();
            values.insert(ElementId(1), value.to_string());
            Self { values, checked: 0 }
        }
    }

    impl FormInspector for Controls {
        fn controls(&self) -> Vec<ElementId> {
            self.values.keys().copied().collect()
        }

        fn kind(&self, _element: ElementId) -> ControlKind {
            ControlKind::input("text")
        }

        fn attributes(&self, _element: ElementId) -> Vec<Attribute> {
            Vec::new()
        }

        fn value(&self, element: ElementId) -> String {
            self.values.get(&element).cloned().unwrap_or_default()
        }

        fn group_checked_count(&self, _element: ElementId) -> usize {
            self.checked
        }
    }

    fn field_with(registry: &ValidatorRegistry, kind: ControlKind, attrs: &[(&str, &str)]) -> Field {
        let attrs: Vec<Attribute> = attrs.iter().map(|(n, v)| Attribute::new(*n, *v)).collect();
        Field::new(ElementId(1), kind, resolve(&attrs, registry))
    }

    fn text_field(attrs: &[(&str, &str)]) -> Field {
        field_with(&ValidatorRegistry::default(), ControlKind::input("text"), attrs)
    }

    #[test]
    fn required_halts_before_minlength() {
        let field = text_field(&[("required", ""), ("minlength", "5")]);
        let outcome = evaluate_field(&field, &Controls::with_value(""), "en");
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec!["This field is required".to_string()]);
    }

    #[test]
    fn non_halting_failures_accumulate() {
        let field = text_field(&[("minlength", "5"), ("pattern", r"/^\d+$/")]);
        let outcome = evaluate_field(&field, &Controls::with_value("ab"), "en");
        assert_eq!(
            outcome.errors,
            vec![
                "This field must be at least 5 characters long".to_string(),
                "Please match the required format".to_string()
            ]
        );
    }

    #[test]
    fn passing_field_is_valid() {
        let field = text_field(&[("required", ""), ("minlength", "2")]);
        let outcome = evaluate_field(&field, &Controls::with_value("hello"), "en");
        assert_eq!(outcome, Outcome { valid: true, errors: Vec::new() });
    }

    #[test]
    fn empty_value_bypasses_format_validators() {
        let field = text_field(&[("type", "email"), ("pattern", "/x/"), ("minlength", "3")]);
        assert!(evaluate_field(&field, &Controls::with_value(""), "en").valid);
    }

    #[test]
    fn override_template_expands_value() {
        let field = text_field(&[
            ("pattern", r"/^\d+$/"),
            ("data-formcheck-pattern-message", "'${0}' is not ${1}"),
        ]);
        let outcome = evaluate_field(&field, &Controls::with_value("42a"), "en");
        assert_eq!(outcome.errors, vec![r"'42a' is not /^\d+$/".to_string()]);
    }

    #[test]
    fn localized_override_wins_over_neutral() {
        let field = text_field(&[
            ("required", ""),
            ("data-formcheck-required-message", "Needed"),
            ("data-formcheck-required-message-de", "Pflicht"),
        ]);
        let inspector = Controls::with_value("");
        assert_eq!(evaluate_field(&field, &inspector, "de").errors, vec!["Pflicht".to_string()]);
        assert_eq!(evaluate_field(&field, &inspector, "en").errors, vec!["Needed".to_string()]);
    }

    #[test]
    fn computed_message_is_used_verbatim() {
        let mut registry = ValidatorRegistry::default();
        registry.register(
            "even",
            ValidatorDef::new(|value, _, _| value.parse::<i64>().map_or(false, |n| n % 2 == 0))
                .message(Message::computed(|value, args| {
                    format!("{value} is odd ({} args)", args.len())
                })),
        );
        let field = field_with(
            &registry,
            ControlKind::input("text"),
            &[("data-formcheck-even", "x"), ("data-formcheck-even-message", "ignored")],
        );
        let outcome = evaluate_field(&field, &Controls::with_value("3"), "en");
        assert_eq!(outcome.errors, vec!["3 is odd (2 args)".to_string()]);
    }

    #[test]
    fn computed_message_sees_value_first() {
        let mut registry = ValidatorRegistry::default();
        registry.register(
            "between",
            ValidatorDef::new(|_, _, _| false)
                .message(Message::computed(|_, args| format!("{} not in {}..{}", args[0], args[1], args[2]))),
        );
        let field = field_with(&registry, ControlKind::input("text"), &[("data-formcheck-between", "3,6")]);
        let outcome = evaluate_field(&field, &Controls::with_value("9"), "en");
        assert_eq!(outcome.errors, vec!["9 not in 3..6".to_string()]);
    }

    #[test]
    fn missing_message_uses_fallback() {
        let mut registry = ValidatorRegistry::default();
        registry.register("never", ValidatorDef::new(|_, _, _| false));
        let field = field_with(&registry, ControlKind::input("text"), &[("data-formcheck-never", "")]);
        let outcome = evaluate_field(&field, &Controls::with_value("x"), "en");
        assert_eq!(outcome.errors, vec!["Validation failed for rule 'never'".to_string()]);
    }

    #[test]
    fn checkbox_min_uses_group_count() {
        let field = field_with(
            &ValidatorRegistry::default(),
            ControlKind::input("checkbox"),
            &[("min", "2")],
        );
        let inspector = Controls {
            checked: 1,
            ..Controls::with_value("on")
        };
        let outcome = evaluate_field(&field, &inspector, "en");
        assert_eq!(outcome.errors, vec!["Minimum value for this field is 2".to_string()]);
    }

    #[test]
    fn every_validator_sees_the_live_value() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ValidatorRegistry::default();
        let log = seen.clone();
        registry.register(
            "spy",
            ValidatorDef::new(move |value, params, ctx| {
                log.lock().unwrap().push((value.to_string(), params.to_vec(), ctx.element()));
                true
            }),
        );
        let field = field_with(&registry, ControlKind::input("text"), &[("data-formcheck-spy", "a,b")]);
        evaluate_field(&field, &Controls::with_value("first"), "en");
        evaluate_field(&field, &Controls::with_value("second"), "en");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
        assert_eq!(seen[1].1, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(seen[1].2, ElementId(1));
    }

    #[test]
    fn success_never_halts() {
        let field = text_field(&[("required", ""), ("maxlength", "1")]);
        let outcome = evaluate_field(&field, &Controls::with_value("long"), "en");
        assert_eq!(
            outcome.errors,
            vec!["This field must be at most 1 characters long".to_string()]
        );
    }
}
