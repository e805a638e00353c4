//! Message bundles and the thread-safe catalog.

use crate::{I18nError, Locale, Result, interpolate};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use validates_url_log::{debug, info, warn};

/// English messages for the three failure kinds, keyed under `errors.messages`.
const BUILTIN_EN: &str = include_str!("../locales/en.json");

/// Messages for a single locale, keyed by dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object. Nested objects are flattened with `.`, so
    /// `{"errors": {"messages": {"url": "..."}}}` yields `errors.messages.url`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(root) = value else {
            return Err(I18nError::ParseError(
                "message file must contain a JSON object".to_string(),
            ));
        };

        let mut bundle = Self::new();
        for (key, child) in root {
            bundle.flatten(key.clone(), child);
        }
        Ok(bundle)
    }

    fn flatten(&mut self, prefix: String, value: &Value) {
        match value {
            Value::String(text) => {
                self.messages.insert(prefix, text.clone());
            }
            Value::Object(children) => {
                for (key, child) in children {
                    self.flatten(format!("{}.{}", prefix, key), child);
                }
            }
            Value::Null => {}
            other => {
                self.messages.insert(prefix, other.to_string());
            }
        }
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Copy every message of `other` into this bundle, replacing existing keys.
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }
}

/// Bundles for every loaded locale.
#[derive(Debug, Default)]
pub struct Messages {
    bundles: HashMap<String, MessageBundle>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bundle` for `locale`, merging into any bundle already there.
    pub fn add_bundle(&mut self, locale: &Locale, bundle: MessageBundle) {
        self.bundles.entry(locale.tag()).or_default().merge(bundle);
    }

    /// The bundle for `locale`, falling back to its language-only form.
    pub fn get_bundle(&self, locale: &Locale) -> Option<&MessageBundle> {
        self.bundles.get(&locale.tag()).or_else(|| {
            locale
                .region
                .as_ref()
                .and_then(|_| self.bundles.get(&locale.language_only().tag()))
        })
    }

    pub fn locales(&self) -> impl Iterator<Item = &String> {
        self.bundles.keys()
    }

    /// Load one `<locale>.json` file.
    ///
    /// The locale comes from the file stem. A file whose only top-level key is
    /// that locale's tag (`{"en": {"errors": ...}}`) is unwrapped first.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Locale> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(I18nError::NotFound(path.display().to_string()));
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| I18nError::ParseError(format!("invalid file name: {:?}", path)))?;
        let locale = Locale::parse(stem)?;

        let content = fs::read_to_string(path)?;
        let mut value: Value = serde_json::from_str(&content)?;
        if let Value::Object(root) = &mut value {
            if root.len() == 1 {
                let tag = locale.tag();
                if let Some(inner) = root.remove(&tag).or_else(|| root.remove(stem)) {
                    value = inner;
                }
            }
        }

        let bundle = MessageBundle::from_value(&value)?;
        debug!(
            target: "validates_url::catalog",
            "loaded {} messages for {} from {}",
            bundle.len(),
            locale,
            path.display()
        );
        self.add_bundle(&locale, bundle);
        Ok(locale)
    }

    /// Load every `*.json` file in `dir`, in file-name order.
    ///
    /// Files whose name is not a locale tag are skipped with a warning.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(I18nError::NotFound(dir.display().to_string()));
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.retain(|p| p.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_file(&path) {
                Ok(_) => loaded += 1,
                Err(I18nError::InvalidLocale(stem)) => {
                    warn!(
                        target: "validates_url::catalog",
                        "skipping {}: {:?} is not a locale tag",
                        path.display(),
                        stem
                    );
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            target: "validates_url::catalog",
            "loaded {} catalog files from {}",
            loaded,
            dir.display()
        );
        Ok(loaded)
    }
}

/// Thread-safe catalog with locale fallback.
///
/// Nothing is loaded implicitly: call [`I18n::with_builtin_messages`],
/// [`I18n::load_from_dir`] or [`I18n::add_bundle`] during startup. Clones share
/// the same underlying messages.
///
/// ```
/// use validates_url_i18n::{I18n, Locale};
///
/// let i18n = I18n::new().with_builtin_messages();
/// assert_eq!(i18n.t("errors.messages.url", &Locale::en_us()), "is not a valid URL");
/// ```
#[derive(Clone)]
pub struct I18n {
    messages: Arc<RwLock<Messages>>,
    default_locale: Locale,
    fallback_locale: Option<Locale>,
}

impl I18n {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Messages::new())),
            default_locale: Locale::en(),
            fallback_locale: None,
        }
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn with_fallback(mut self, locale: Locale) -> Self {
        self.fallback_locale = Some(locale);
        self
    }

    /// Register the bundled English messages under `en`.
    pub fn with_builtin_messages(self) -> Self {
        match MessageBundle::from_json(BUILTIN_EN) {
            Ok(bundle) => self.add_bundle(&Locale::en(), bundle),
            Err(e) => warn!(target: "validates_url::catalog", "built-in catalog unusable: {}", e),
        }
        self
    }

    pub fn load_from_dir(self, dir: impl AsRef<Path>) -> Result<Self> {
        self.messages.write().load_from_dir(dir)?;
        Ok(self)
    }

    pub fn load_file(self, path: impl AsRef<Path>) -> Result<Self> {
        self.messages.write().load_file(path)?;
        Ok(self)
    }

    pub fn add_bundle(&self, locale: &Locale, bundle: MessageBundle) {
        self.messages.write().add_bundle(locale, bundle);
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Look up `key` without falling back to the key itself.
    ///
    /// Tries `locale`, its language-only form, the fallback locale and then
    /// the default locale.
    pub fn lookup(&self, key: &str, locale: &Locale) -> Option<String> {
        let messages = self.messages.read();

        std::iter::once(locale)
            .chain(self.fallback_locale.as_ref())
            .chain(std::iter::once(&self.default_locale))
            .filter_map(|candidate| messages.get_bundle(candidate))
            .find_map(|bundle| bundle.get(key))
            .map(str::to_string)
    }

    /// Translate `key`, returning the key itself when no bundle has it.
    pub fn t(&self, key: &str, locale: &Locale) -> String {
        self.lookup(key, locale).unwrap_or_else(|| key.to_string())
    }

    /// Translate and substitute `{name}` / `%{name}` placeholders.
    pub fn t_args(&self, key: &str, locale: &Locale, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key, locale), args)
    }

    /// Whether `locale` (or its language-only form) has `key`.
    pub fn has(&self, key: &str, locale: &Locale) -> bool {
        self.messages
            .read()
            .get_bundle(locale)
            .is_some_and(|b| b.has(key))
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("default_locale", &self.default_locale)
            .field("fallback_locale", &self.fallback_locale)
            .finish_non_exhaustive()
    }
}
