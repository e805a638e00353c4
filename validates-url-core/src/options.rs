// URL rule configuration

use crate::OptionsError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Schemes accepted when none are configured.
pub const DEFAULT_SCHEMES: &[&str] = &["http", "https"];

/// Message key used when none is configured.
pub const DEFAULT_MESSAGE: &str = "url";

/// Option keys kept out of failure contexts.
pub const RESERVED_OPTIONS: &[&str] = &["schemes", "no_local"];

/// Options for a [`UrlValidator`](crate::UrlValidator), fixed at construction.
///
/// Keys the rule does not recognize are kept in `extra` and show up in the
/// context of `url` and `host` failures.
///
/// ```
/// use validates_url_core::UrlRuleOptions;
///
/// let options = UrlRuleOptions::from_json_str(r#"{"schemes": ["ftp"], "if": "public"}"#).unwrap();
/// assert!(options.schemes.contains("ftp"));
/// assert!(!options.no_local);
/// assert_eq!(options.extra["if"], "public");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct UrlRuleOptions {
    /// Accepted schemes, compared case-sensitively with the parsed scheme
    pub schemes: BTreeSet<String>,
    /// Reject hosts containing `localhost` unless they also contain a `.`
    pub no_local: bool,
    /// Catalog key (or literal text) for `url` and `host` failures
    pub message: String,
    pub allow_nil: Option<bool>,
    pub allow_blank: Option<bool>,
    /// Unrecognized options, passed through untouched
    pub extra: Map<String, Value>,
}

impl Default for UrlRuleOptions {
    fn default() -> Self {
        Self {
            schemes: default_schemes(),
            no_local: false,
            message: DEFAULT_MESSAGE.to_string(),
            allow_nil: None,
            allow_blank: None,
            extra: Map::new(),
        }
    }
}

fn default_schemes() -> BTreeSet<String> {
    DEFAULT_SCHEMES.iter().map(|s| s.to_string()).collect()
}

/// Only `null` and `false` count as false.
fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl UrlRuleOptions {
    /// Build options from a generic configuration map. Never fails: missing
    /// or empty values fall back to their defaults.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut options = Self::default();
        for (key, value) in map {
            options.apply(key, value);
        }
        options
    }

    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        let map: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self::from_map(map))
    }

    /// Read options from a TOML table, e.g. a `[validations.homepage]` section
    /// extracted by the caller.
    pub fn from_toml_str(source: &str) -> Result<Self, OptionsError> {
        let map: Map<String, Value> = toml::from_str(source)?;
        Ok(Self::from_map(map))
    }

    fn apply(&mut self, key: String, value: Value) {
        match key.as_str() {
            "schemes" => {
                let schemes: BTreeSet<String> = match value {
                    Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
                    other => scalar_to_string(&other).into_iter().collect(),
                };
                self.schemes = if schemes.is_empty() {
                    default_schemes()
                } else {
                    schemes
                };
            }
            "no_local" => self.no_local = truthy(&value),
            "message" => {
                if let Some(message) = scalar_to_string(&value) {
                    self.message = message;
                }
            }
            "allow_nil" => self.allow_nil = Some(truthy(&value)),
            "allow_blank" => self.allow_blank = Some(truthy(&value)),
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    pub fn with_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schemes: BTreeSet<String> = schemes.into_iter().map(Into::into).collect();
        if !schemes.is_empty() {
            self.schemes = schemes;
        }
        self
    }

    pub fn no_local(mut self, no_local: bool) -> Self {
        self.no_local = no_local;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn allow_nil(mut self, allow: bool) -> Self {
        self.allow_nil = Some(allow);
        self
    }

    pub fn allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = Some(allow);
        self
    }

    /// Set any option by name, recognized or not.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.apply(key.into(), value.into());
        self
    }

    /// Every option as a map, including the reserved keys.
    pub fn to_map(&self) -> Map<String, Value> {
        Map::from(self.clone())
    }

    /// Context for `url` and `host` failures: all options except the
    /// reserved ones, plus the offending `value`.
    pub fn filtered(&self, value: &str) -> Map<String, Value> {
        let mut filtered = self.to_map();
        for key in RESERVED_OPTIONS {
            filtered.remove(*key);
        }
        filtered.insert("value".to_string(), Value::String(value.to_string()));
        filtered
    }
}

impl From<Map<String, Value>> for UrlRuleOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl From<UrlRuleOptions> for Map<String, Value> {
    fn from(options: UrlRuleOptions) -> Self {
        let mut map = options.extra;
        map.insert(
            "schemes".to_string(),
            Value::Array(options.schemes.into_iter().map(Value::String).collect()),
        );
        map.insert("no_local".to_string(), Value::Bool(options.no_local));
        map.insert("message".to_string(), Value::String(options.message));
        if let Some(allow) = options.allow_nil {
            map.insert("allow_nil".to_string(), Value::Bool(allow));
        }
        if let Some(allow) = options.allow_blank {
            map.insert("allow_blank".to_string(), Value::Bool(allow));
        }
        map
    }
}
