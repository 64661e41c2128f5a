//! Session configuration.
//!
//! A [`FormConfig`] is handed to each session at construction; there is no
//! process-wide default to mutate. Missing keys fall back to the defaults
//! below, so a host can ship a partial JSON document:
//!
//! ```ignore
//! use formcheck_core::FormConfig;
//!
//! let config = FormConfig::from_json(r#"{ "errorClass": "is-invalid", "locale": "fr" }"#)?;
//! assert_eq!(config.class_to, "form-group");
//! ```

use crate::catalog::DEFAULT_LOCALE;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Class names, error-node settings, locale and live mode for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Class of the ancestor that receives the error/success classes
    pub class_to: String,
    /// Class applied when a field is invalid
    pub error_class: String,
    /// Class applied when a field is valid
    pub success_class: String,
    /// Class of the element the error text node is appended to
    pub error_text_parent: String,
    /// Tag name of the generated error text node
    pub error_text_tag: String,
    /// Class of the generated error text node
    pub error_text_class: String,
    /// Locale used for default messages and message overrides
    #[serde(alias = "lang")]
    pub locale: String,
    /// Validate fields as the user edits them
    pub live_validation: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            class_to: "form-group".to_string(),
            error_class: "has-danger".to_string(),
            success_class: "has-success".to_string(),
            error_text_parent: "form-group".to_string(),
            error_text_tag: "div".to_string(),
            error_text_class: "text-help".to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            live_validation: true,
        }
    }
}

impl FormConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every key holds a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("classTo", &self.class_to),
            ("errorClass", &self.error_class),
            ("successClass", &self.success_class),
            ("errorTextParent", &self.error_text_parent),
            ("errorTextTag", &self.error_text_tag),
            ("locale", &self.locale),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(key, "must not be empty"));
            }
        }

        if self.error_class == self.success_class {
            return Err(ConfigError::invalid(
                "successClass",
                format!("must differ from errorClass `{}`", self.error_class),
            ));
        }

        if !self
            .error_text_tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(ConfigError::invalid(
                "errorTextTag",
                format!("`{}` is not a valid tag name", self.error_text_tag),
            ));
        }

        Ok(())
    }

    /// The error text lives inside the class target itself.
    pub fn text_parent_is_class_target(&self) -> bool {
        self.class_to == self.error_text_parent
    }

    pub fn with_class_to(mut self, class: impl Into<String>) -> Self {
        self.class_to = class.into();
        self
    }

    pub fn with_error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    pub fn with_success_class(mut self, class: impl Into<String>) -> Self {
        self.success_class = class.into();
        self
    }

    pub fn with_error_text_parent(mut self, class: impl Into<String>) -> Self {
        self.error_text_parent = class.into();
        self
    }

    pub fn with_error_text_tag(mut self, tag: impl Into<String>) -> Self {
        self.error_text_tag = tag.into();
        self
    }

    pub fn with_error_text_class(mut self, class: impl Into<String>) -> Self {
        self.error_text_class = class.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_live_validation(mut self, enabled: bool) -> Self {
        self.live_validation = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormConfig::default();
        assert_eq!(config.class_to, "form-group");
        assert_eq!(config.error_class, "has-danger");
        assert_eq!(config.success_class, "has-success");
        assert_eq!(config.error_text_tag, "div");
        assert_eq!(config.error_text_class, "text-help");
        assert_eq!(config.locale, "en");
        assert!(config.live_validation);
        assert!(config.text_parent_is_class_target());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            FormConfig::from_json(r#"{ "errorClass": "is-invalid", "liveValidation": false }"#)
                .unwrap();
        assert_eq!(config.error_class, "is-invalid");
        assert!(!config.live_validation);
        assert_eq!(config.class_to, "form-group");
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn lang_alias() {
        let config = FormConfig::from_json(r#"{ "lang": "fr" }"#).unwrap();
        assert_eq!(config.locale, "fr");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = FormConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn empty_values_are_rejected() {
        let err = FormConfig::from_json(r#"{ "errorTextTag": "" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "errorTextTag",
                ..
            }
        ));
    }

    #[test]
    fn identical_state_classes_are_rejected() {
        let config = FormConfig::new()
            .with_error_class("state")
            .with_success_class("state");
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let config = FormConfig::new().with_error_text_tag("<div>");
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_setters() {
        let config = FormConfig::new()
            .with_class_to("field")
            .with_error_text_parent("messages")
            .with_error_text_class("help")
            .with_locale("de");
        assert_eq!(config.class_to, "field");
        assert_eq!(config.error_text_class, "help");
        assert_eq!(config.locale, "de");
        assert!(!config.text_parent_is_class_target());
    }
}
