//! Default message catalog.
//!
//! Maps `locale -> validator name -> template`. Templates use positional
//! placeholders: `${0}` is the field's value, `${1}` onwards the validator's
//! parameters. Lookups fail softly; callers fall back to an explicit message or
//! to the generic fallback text.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Locale used when neither the validator nor the config names one.
pub const DEFAULT_LOCALE: &str = "en";

const EN: &[(&str, &str)] = &[
    ("required", "This field is required"),
    ("email", "This field requires a valid e-mail address"),
    ("number", "This field requires a number"),
    ("integer", "This field requires an integer value"),
    ("minlength", "This field must be at least ${1} characters long"),
    ("maxlength", "This field must be at most ${1} characters long"),
    ("min", "Minimum value for this field is ${1}"),
    ("max", "Maximum value for this field is ${1}"),
    ("pattern", "Please match the required format"),
];

const FR: &[(&str, &str)] = &[
    ("required", "Ce champ est obligatoire"),
    ("email", "Ce champ requiert une adresse e-mail valide"),
    ("number", "Ce champ requiert un nombre"),
    ("integer", "Ce champ requiert un nombre entier"),
    ("minlength", "Ce champ doit contenir au moins ${1} caractères"),
    ("maxlength", "Ce champ doit contenir au plus ${1} caractères"),
    ("min", "La valeur minimale de ce champ est ${1}"),
    ("max", "La valeur maximale de ce champ est ${1}"),
    ("pattern", "Veuillez respecter le format requis"),
];

const DE: &[(&str, &str)] = &[
    ("required", "Dieses Feld ist erforderlich"),
    ("email", "Dieses Feld erfordert eine gültige E-Mail-Adresse"),
    ("number", "Dieses Feld erfordert eine Zahl"),
    ("integer", "Dieses Feld erfordert eine ganze Zahl"),
    ("minlength", "Dieses Feld muss mindestens ${1} Zeichen lang sein"),
    ("maxlength", "Dieses Feld darf höchstens ${1} Zeichen lang sein"),
    ("min", "Der Mindestwert für dieses Feld ist ${1}"),
    ("max", "Der Höchstwert für dieses Feld ist ${1}"),
    ("pattern", "Bitte halten Sie das geforderte Format ein"),
];

static BUILTIN: OnceLock<MessageCatalog> = OnceLock::new();

/// Normalize a locale tag: trimmed, lower-case, `_` replaced by `-`.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().to_ascii_lowercase().replace('_', "-")
}

/// Base language of a locale tag (`pt-br` -> `pt`).
pub(crate) fn base_language(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

/// Read-only lookup table of default validator messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl MessageCatalog {
    /// A catalog with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in `en`, `fr` and `de` tables.
    pub fn builtin() -> Self {
        BUILTIN
            .get_or_init(|| {
                let mut catalog = Self::empty();
                for (locale, table) in [("en", EN), ("fr", FR), ("de", DE)] {
                    catalog = catalog.extend_locale(locale, table.iter().copied());
                }
                catalog
            })
            .clone()
    }

    /// Add or replace one template.
    pub fn with_message(
        mut self,
        locale: &str,
        validator: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.insert(locale, validator, template);
        self
    }

    /// Add or replace a batch of templates for one locale.
    pub fn extend_locale<K, V>(mut self, locale: &str, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let table = self.locales.entry(normalize_locale(locale)).or_default();
        for (name, template) in entries {
            table.insert(name.into(), template.into());
        }
        self
    }

    /// Add or replace one template in place.
    pub fn insert(&mut self, locale: &str, validator: impl Into<String>, template: impl Into<String>) {
        self.locales
            .entry(normalize_locale(locale))
            .or_default()
            .insert(validator.into(), template.into());
    }

    /// Template for a validator in a locale.
    ///
    /// A region tag falls back to its base language (`fr-ca` -> `fr`).
    pub fn lookup(&self, locale: &str, validator: &str) -> Option<&str> {
        let locale = normalize_locale(locale);
        let exact = self
            .locales
            .get(&locale)
            .and_then(|table| table.get(validator));

        exact
            .or_else(|| {
                self.locales
                    .get(base_language(&locale))
                    .and_then(|table| table.get(validator))
            })
            .map(String::as_str)
    }

    /// Check whether any template exists for a locale.
    pub fn has_locale(&self, locale: &str) -> bool {
        let locale = normalize_locale(locale);
        self.locales.contains_key(&locale) || self.locales.contains_key(base_language(&locale))
    }

    /// Known locales, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_locale() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(catalog.locales(), vec!["de", "en", "fr"]);
        for name in [
            "required",
            "email",
            "number",
            "integer",
            "minlength",
            "maxlength",
            "min",
            "max",
            "pattern",
        ] {
            for locale in ["en", "fr", "de"] {
                assert!(
                    catalog.lookup(locale, name).is_some(),
                    "missing {locale}/{name}"
                );
            }
        }
    }

    #[test]
    fn lookup_is_soft() {
        let catalog = MessageCatalog::builtin();
        assert!(catalog.lookup("xx", "required").is_none());
        assert!(catalog.lookup("en", "unknown").is_none());
        assert!(catalog.lookup("en", "text").is_none());
    }

    #[test]
    fn region_falls_back_to_language() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(
            catalog.lookup("fr_CA", "required"),
            Some("Ce champ est obligatoire")
        );
        assert!(catalog.has_locale("DE-at"));
    }

    #[test]
    fn exact_region_wins() {
        let catalog = MessageCatalog::builtin().with_message("fr-ca", "required", "Requis");
        assert_eq!(catalog.lookup("fr-CA", "required"), Some("Requis"));
        assert_eq!(
            catalog.lookup("fr", "required"),
            Some("Ce champ est obligatoire")
        );
    }

    #[test]
    fn extend_locale_adds_entries() {
        let catalog =
            MessageCatalog::empty().extend_locale("es", [("required", "Campo obligatorio")]);
        assert_eq!(catalog.lookup("es", "required"), Some("Campo obligatorio"));
        assert!(!catalog.has_locale("en"));
    }
}
