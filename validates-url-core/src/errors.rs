// Validation failures

use crate::messages;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use validates_url_i18n::{I18n, Locale};

/// Extra fields attached to a failure, available to message templates.
pub type Context = serde_json::Map<String, Value>;

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Blank or unparseable
    Url,
    /// Host looks local
    Host,
    /// Scheme not allowed, or no host
    Schema,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Url => "url",
            FailureKind::Host => "host",
            FailureKind::Schema => "schema",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Attribute that failed validation
    pub attribute: String,

    pub kind: FailureKind,

    /// Filtered options and the offending value (empty for `schema`)
    pub context: Context,
}

impl ValidationFailure {
    pub fn new(attribute: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
            context: Context::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// The original input, when the context carries it.
    pub fn value(&self) -> Option<&str> {
        self.context.get("value").and_then(Value::as_str)
    }

    /// Catalog key for this failure: the configured `message` if the context
    /// has one, otherwise the kind token.
    pub fn message_key(&self) -> &str {
        self.context
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(self.kind.as_str())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.kind)
    }
}

impl std::error::Error for ValidationFailure {}

/// All failures collected for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationFailure>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationFailure>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationFailure) {
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationFailure>) {
        self.errors.extend(errors);
    }

    /// Failures recorded against `attribute`.
    pub fn get_field_errors(&self, attribute: &str) -> Vec<&ValidationFailure> {
        self.errors
            .iter()
            .filter(|e| e.attribute == attribute)
            .collect()
    }

    /// Failure kinds recorded against `attribute`, in emission order.
    pub fn kinds_for(&self, attribute: &str) -> Vec<FailureKind> {
        self.get_field_errors(attribute)
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    /// Render every failure as `"<attribute> <message>"`.
    pub fn full_messages(&self, i18n: &I18n, locale: &Locale) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| messages::full_message(e, i18n, locale))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "attribute": e.attribute,
                    "kind": e.kind,
                    "context": e.context,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationFailure>> for ValidationErrors {
    fn from(errors: Vec<ValidationFailure>) -> Self {
        Self::new(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Rule options could not be read from configuration text.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure(attribute: &str, kind: FailureKind) -> ValidationFailure {
        ValidationFailure::new(attribute, kind)
    }

    #[test]
    fn test_kind_tokens() {
        assert_eq!(FailureKind::Url.to_string(), "url");
        assert_eq!(FailureKind::Host.as_str(), "host");
        assert_eq!(serde_json::to_value(FailureKind::Schema).unwrap(), json!("schema"));
    }

    #[test]
    fn test_message_key_prefers_context_message() {
        let mut context = Context::new();
        context.insert("message".into(), json!("url"));
        context.insert("value".into(), json!("http://intranet"));
        let host = failure("homepage", FailureKind::Host).with_context(context);

        assert_eq!(host.message_key(), "url");
        assert_eq!(host.value(), Some("http://intranet"));
        assert_eq!(failure("homepage", FailureKind::Schema).message_key(), "schema");
    }

    #[test]
    fn test_field_errors() {
        let errors = ValidationErrors::from(vec![
            failure("homepage", FailureKind::Host),
            failure("feed", FailureKind::Url),
            failure("homepage", FailureKind::Schema),
        ]);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get_field_errors("homepage").len(), 2);
        assert_eq!(
            errors.kinds_for("homepage"),
            vec![FailureKind::Host, FailureKind::Schema]
        );
        assert!(errors.kinds_for("missing").is_empty());
    }

    #[test]
    fn test_to_json() {
        let mut errors = ValidationErrors::default();
        errors.add(failure("feed", FailureKind::Schema));

        assert_eq!(
            errors.to_json(),
            json!({"errors": [{"attribute": "feed", "kind": "schema", "context": {}}]})
        );
    }

    #[test]
    fn test_display() {
        let errors = ValidationErrors::new(vec![failure("feed", FailureKind::Url)]);
        assert_eq!(errors.to_string(), "feed: url\n");
    }
}
