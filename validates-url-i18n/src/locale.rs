//! Locale tags used to key message bundles.

use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language with optional script and region.
///
/// # Examples
///
/// ```
/// use validates_url_i18n::Locale;
///
/// let en_us = Locale::parse("en_us").unwrap();
/// assert_eq!(en_us.tag(), "en-US");
/// assert_eq!(en_us.language_only().tag(), "en");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// ISO 639 language code, lower-case
    pub language: String,
    /// ISO 3166 region or UN M.49 code
    pub region: Option<String>,
    /// ISO 15924 script, title-case
    pub script: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: None,
        }
    }

    /// Parse a BCP 47 style tag. Both `-` and `_` separate subtags; unknown
    /// subtags (variants, extensions) are ignored.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);

        let language = parts.next().unwrap_or_default().to_lowercase();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(I18nError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts {
            let alphabetic = part.chars().all(|c| c.is_ascii_alphabetic());
            match part.len() {
                4 if alphabetic => script = Some(title_case(part)),
                2 if alphabetic => region = Some(part.to_uppercase()),
                3 if part.chars().all(|c| c.is_ascii_digit()) => region = Some(part.to_string()),
                _ => {}
            }
        }

        Ok(Self {
            language,
            region,
            script,
        })
    }

    /// The canonical tag, e.g. `zh-Hans-CN`.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        for subtag in [&self.script, &self.region].into_iter().flatten() {
            tag.push('-');
            tag.push_str(subtag);
        }
        tag
    }

    /// The same locale without its region.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: self.script.clone(),
            region: None,
        }
    }

    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    pub fn de() -> Self {
        Self::new("de", None::<&str>)
    }

    pub fn fr() -> Self {
        Self::new("fr", None::<&str>)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}
