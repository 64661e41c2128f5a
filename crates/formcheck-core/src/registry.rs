//! Validator registry.
//!
//! Each session owns its own registry, seeded with the built-ins, so
//! registering a validator on one form never leaks into another.

use crate::builtins;
use crate::catalog::{normalize_locale, MessageCatalog, DEFAULT_LOCALE};
use crate::descriptor::{ValidatorDef, ValidatorDescriptor};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Name -> descriptor table with catalog-backed default messages.
#[derive(Clone)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Arc<ValidatorDescriptor>>,
    catalog: Arc<MessageCatalog>,
    default_locale: String,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new(catalog: MessageCatalog, default_locale: impl Into<String>) -> Self {
        Self {
            validators: HashMap::new(),
            catalog: Arc::new(catalog),
            default_locale: normalize_locale(&default_locale.into()),
        }
    }

    /// A registry holding the built-in validators.
    pub fn with_builtins(catalog: MessageCatalog, default_locale: impl Into<String>) -> Self {
        let mut registry = Self::new(catalog, default_locale);
        builtins::install(&mut registry);
        registry
    }

    /// Insert or replace the validator registered under `name`.
    ///
    /// Without an explicit message the default comes from the catalog, first
    /// in the definition's locale, then in the registry's default locale.
    pub fn register(&mut self, name: impl Into<String>, def: ValidatorDef) {
        let name = name.into();
        let descriptor = self.describe(name.clone(), def);
        crate::trace_debug!(
            validator = %name,
            priority = descriptor.priority(),
            halt = descriptor.halts_on_failure(),
            "registering validator"
        );
        if self.validators.insert(name, Arc::new(descriptor)).is_some() {
            crate::trace_debug!("replaced an existing validator");
        }
    }

    /// Build a descriptor without storing it; used for field-local
    /// validators that never enter the name table.
    pub(crate) fn describe(&self, name: String, def: ValidatorDef) -> ValidatorDescriptor {
        let locale = def
            .locale
            .as_deref()
            .map(normalize_locale)
            .unwrap_or_else(|| self.default_locale.clone());

        let message = def.message.clone().or_else(|| {
            self.catalog
                .lookup(&locale, &name)
                .or_else(|| self.catalog.lookup(&self.default_locale, &name))
                .map(Into::into)
        });

        ValidatorDescriptor::new(name, def, message, locale)
    }

    /// Look up a validator by name.
    pub fn resolve(&self, name: &str) -> Option<Arc<ValidatorDescriptor>> {
        self.validators.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins(MessageCatalog::builtin(), DEFAULT_LOCALE)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .field("default_locale", &self.default_locale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{NUMBER_PRIORITY, REQUIRED_PRIORITY, TEXT_PRIORITY};
    use crate::descriptor::{Message, DEFAULT_PRIORITY};

    fn template(descriptor: &ValidatorDescriptor) -> Option<&str> {
        match descriptor.message() {
            Some(Message::Template(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    #[test]
    fn builtins_are_registered() {
        let registry = ValidatorRegistry::default();
        assert_eq!(
            registry.names(),
            vec![
                "email",
                "integer",
                "max",
                "maxlength",
                "min",
                "minlength",
                "number",
                "pattern",
                "required",
                "text"
            ]
        );
    }

    #[test]
    fn builtin_priorities() {
        let registry = ValidatorRegistry::default();
        let required = registry.resolve("required").unwrap();
        assert_eq!(required.priority(), REQUIRED_PRIORITY);
        assert!(required.halts_on_failure());
        assert_eq!(registry.resolve("number").unwrap().priority(), NUMBER_PRIORITY);
        assert_eq!(registry.resolve("text").unwrap().priority(), TEXT_PRIORITY);
        for name in ["email", "integer", "minlength", "maxlength", "min", "max", "pattern"] {
            let descriptor = registry.resolve(name).unwrap();
            assert_eq!(descriptor.priority(), DEFAULT_PRIORITY, "{name}");
            assert!(!descriptor.halts_on_failure(), "{name}");
        }
    }

    #[test]
    fn default_messages_follow_locale() {
        let registry = ValidatorRegistry::with_builtins(MessageCatalog::builtin(), "fr");
        let required = registry.resolve("required").unwrap();
        assert_eq!(template(&required), Some("Ce champ est obligatoire"));
        assert_eq!(required.locale(), "fr");
    }

    #[test]
    fn definition_locale_overrides_default() {
        let mut registry = ValidatorRegistry::default();
        registry.register("required", ValidatorDef::new(|_, _, _| true).locale("de"));
        assert_eq!(
            template(&registry.resolve("required").unwrap()),
            Some("Dieses Feld ist erforderlich")
        );
    }

    #[test]
    fn unknown_locale_falls_back_to_default_locale() {
        let mut registry = ValidatorRegistry::default();
        registry.register("email", ValidatorDef::new(|_, _, _| true).locale("xx"));
        assert_eq!(
            template(&registry.resolve("email").unwrap()),
            Some("This field requires a valid e-mail address")
        );
    }

    #[test]
    fn custom_validator_without_message() {
        let mut registry = ValidatorRegistry::default();
        registry.register("even", ValidatorDef::new(|_, _, _| true));
        let even = registry.resolve("even").unwrap();
        assert!(even.message().is_none());
        assert_eq!(even.priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn reregistration_replaces() {
        let mut registry = ValidatorRegistry::default();
        let before = registry.len();
        registry.register("email", ValidatorDef::new(|_, _, _| false).message("nope").priority(7));
        assert_eq!(registry.len(), before);
        let email = registry.resolve("email").unwrap();
        assert_eq!(email.priority(), 7);
        assert_eq!(template(&email), Some("nope"));
    }

    #[test]
    fn registries_are_independent() {
        let mut first = ValidatorRegistry::default();
        let second = ValidatorRegistry::default();
        first.register("even", ValidatorDef::new(|_, _, _| true));
        assert!(first.contains("even"));
        assert!(!second.contains("even"));
    }

    #[test]
    fn empty_registry() {
        let registry = ValidatorRegistry::new(MessageCatalog::empty(), "en");
        assert!(registry.is_empty());
        assert!(registry.resolve("required").is_none());
    }
}
