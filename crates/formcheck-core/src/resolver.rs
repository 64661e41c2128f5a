//! Attribute-to-validator resolution.
//!
//! Three kinds of attributes attach validators to a control:
//!
//! - `data-formcheck-<name>="a,b"`: validator `<name>` with parameters `a`, `b`
//! - `data-formcheck-type="<name>"`: validator `<name>` without parameters
//! - the native `required`, `min`, `max`, `minlength`, `maxlength`, `pattern`
//!   attributes and the native `type` attribute (`type="email"` attaches
//!   `email`)
//!
//! `data-formcheck-<name>-message[-<locale>]` overrides the failure message of
//! `<name>` instead of attaching anything. Names the registry does not know
//! are dropped without error.

use crate::catalog::{base_language, normalize_locale};
use crate::descriptor::ValidatorDescriptor;
use crate::inspector::Attribute;
use crate::registry::ValidatorRegistry;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Namespace marker of custom attributes.
pub const ATTRIBUTE_PREFIX: &str = "data-formcheck-";

/// Native attributes that map one-to-one onto built-in validators.
pub const NATIVE_ATTRIBUTES: [&str; 6] = ["required", "min", "max", "minlength", "maxlength", "pattern"];

static MESSAGE_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn message_suffix() -> &'static Regex {
    MESSAGE_SUFFIX.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?)-message(?:-(?P<locale>[a-z]{2,3}(?:[-_][a-z0-9]{2,8})?))?$")
            .unwrap()
    })
}

/// Stored parameters per validator name.
///
/// The live value is never stored here; the engine prepends it to build the
/// `${0}`-based argument list of each evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    by_validator: HashMap<String, Vec<String>>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the comma-split parameters of an attribute value.
    pub fn insert(&mut self, validator: impl Into<String>, raw: &str) {
        let values = raw.split(',').map(str::to_string).collect();
        self.by_validator.insert(validator.into(), values);
    }

    /// Parameters of a validator, empty when it has none.
    pub fn get(&self, validator: &str) -> &[String] {
        self.by_validator
            .get(validator)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Argument list of one evaluation: the value followed by the parameters.
    pub fn arguments(&self, validator: &str, value: &str) -> Vec<String> {
        let params = self.get(validator);
        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(value.to_string());
        args.extend_from_slice(params);
        args
    }

    pub fn is_empty(&self) -> bool {
        self.by_validator.is_empty()
    }
}

/// Per-field message overrides, optionally per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOverrides {
    neutral: HashMap<String, String>,
    localized: HashMap<String, HashMap<String, String>>,
}

impl MessageOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override; `locale = None` applies to every locale.
    pub fn insert(&mut self, validator: impl Into<String>, locale: Option<&str>, template: impl Into<String>) {
        match locale {
            Some(locale) => {
                self.localized
                    .entry(normalize_locale(locale))
                    .or_default()
                    .insert(validator.into(), template.into());
            }
            None => {
                self.neutral.insert(validator.into(), template.into());
            }
        }
    }

    /// Override for a validator: exact locale, then base language, then the
    /// locale-neutral override.
    pub fn get(&self, validator: &str, locale: &str) -> Option<&str> {
        let locale = normalize_locale(locale);
        let localized = |tag: &str| {
            self.localized
                .get(tag)
                .and_then(|table| table.get(validator))
        };

        localized(&locale)
            .or_else(|| localized(base_language(&locale)))
            .or_else(|| self.neutral.get(validator))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.neutral.is_empty() && self.localized.is_empty()
    }
}

/// Validators, parameters and overrides resolved from one control.
#[derive(Debug, Clone, Default)]
pub struct ResolvedField {
    /// Sorted by priority, highest first; ties keep attribute order
    pub validators: Vec<Arc<ValidatorDescriptor>>,
    pub parameters: Parameters,
    pub messages: MessageOverrides,
}

impl ResolvedField {
    /// Names of the attached validators in evaluation order.
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    fn attach(&mut self, registry: &ValidatorRegistry, name: &str, value: Option<&str>) {
        let Some(descriptor) = registry.resolve(name) else {
            crate::trace_trace!(validator = %name, "unknown validator, attribute skipped");
            return;
        };

        if !self.validators.iter().any(|v| v.name() == name) {
            self.validators.push(descriptor);
        }
        if let Some(raw) = value.filter(|v| !v.is_empty()) {
            self.parameters.insert(name, raw);
        }
    }
}

/// What one attribute contributes to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeRule<'a> {
    Attach {
        validator: Cow<'a, str>,
        params: Option<&'a str>,
    },
    Override {
        validator: Cow<'a, str>,
        locale: Option<Cow<'a, str>>,
        template: &'a str,
    },
    Ignore,
}

fn classify<'a>(name: &'a str, value: &'a str) -> AttributeRule<'a> {
    if let Some(rest) = name.strip_prefix(ATTRIBUTE_PREFIX) {
        if let Some(caps) = message_suffix().captures(rest) {
            let validator = caps.name("name").map_or("", |m| m.as_str());
            return AttributeRule::Override {
                validator: Cow::Owned(validator.to_string()),
                locale: caps.name("locale").map(|m| Cow::Owned(m.as_str().to_string())),
                template: value,
            };
        }
        if rest == "type" {
            return AttributeRule::Attach {
                validator: Cow::Borrowed(value.trim()),
                params: None,
            };
        }
        return AttributeRule::Attach {
            validator: Cow::Borrowed(rest),
            params: Some(value),
        };
    }

    if NATIVE_ATTRIBUTES.contains(&name) {
        return AttributeRule::Attach {
            validator: Cow::Borrowed(name),
            params: Some(value),
        };
    }

    if name == "type" {
        return AttributeRule::Attach {
            validator: Cow::Owned(value.trim().to_ascii_lowercase()),
            params: None,
        };
    }

    AttributeRule::Ignore
}

/// Resolve a control's attributes against a registry.
pub fn resolve(attributes: &[Attribute], registry: &ValidatorRegistry) -> ResolvedField {
    let mut field = ResolvedField::default();

    for attr in attributes {
        let name = attr.name.trim().to_ascii_lowercase();
        match classify(&name, &attr.value) {
            AttributeRule::Attach { validator, params } => {
                field.attach(registry, &validator, params);
            }
            AttributeRule::Override {
                validator,
                locale,
                template,
            } => {
                field.messages.insert(validator, locale.as_deref(), template);
            }
            AttributeRule::Ignore => {}
        }
    }

    // stable: equal priorities keep attribute order
    field
        .validators
        .sort_by(|a, b| b.priority().cmp(&a.priority()));
    field
}
