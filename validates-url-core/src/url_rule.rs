// The URL rule

use crate::{EachValidator, FailureKind, ParsedUrl, UrlRuleOptions, ValidationFailure};

/// Validates that a value is a URL with an allowed scheme and, optionally,
/// a non-local host.
///
/// Checks run in order:
///
/// 1. Blank or unparseable input yields a single `url` failure and stops.
/// 2. When the URL has a host, it must contain a `.`, unless `no_local` is
///    off and the host contains `localhost`. Otherwise a `host` failure is
///    recorded and checking continues.
/// 3. The scheme must be in `schemes` and the host must be present, or a
///    `schema` failure is recorded.
///
/// Note that with the default `no_local: false`, `http://localhost` is
/// accepted; only `no_local: true` rejects it.
///
/// # Examples
///
/// ```
/// use validates_url_core::{FailureKind, UrlRuleOptions, UrlValidator};
///
/// let rule = UrlValidator::new(UrlRuleOptions::default());
/// assert!(rule.validate("homepage", "https://example.com").is_empty());
///
/// let failures = rule.validate("homepage", "ftp://example.com");
/// assert_eq!(failures.len(), 1);
/// assert_eq!(failures[0].kind, FailureKind::Schema);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlValidator {
    options: UrlRuleOptions,
}

impl UrlValidator {
    pub fn new(options: UrlRuleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &UrlRuleOptions {
        &self.options
    }

    pub fn validate(&self, attribute: &str, value: &str) -> Vec<ValidationFailure> {
        match ParsedUrl::parse(value) {
            ParsedUrl::Malformed(_) | ParsedUrl::Blank => {
                vec![self.failure(attribute, FailureKind::Url, value)]
            }
            ParsedUrl::Parsed { scheme, host } => {
                let mut failures = Vec::new();
                let host = host.as_deref();

                if let Some(host) = host {
                    if !self.host_allowed(host) {
                        failures.push(self.failure(attribute, FailureKind::Host, value));
                    }
                }

                if !(self.options.schemes.contains(&scheme) && host.is_some()) {
                    failures.push(ValidationFailure::new(attribute, FailureKind::Schema));
                }

                failures
            }
        }
    }

    fn host_allowed(&self, host: &str) -> bool {
        (!self.options.no_local && host.contains("localhost")) || host.contains('.')
    }

    fn failure(&self, attribute: &str, kind: FailureKind, value: &str) -> ValidationFailure {
        ValidationFailure::new(attribute, kind).with_context(self.options.filtered(value))
    }
}

impl EachValidator for UrlValidator {
    fn validate_each(&self, attribute: &str, value: &str) -> Vec<ValidationFailure> {
        self.validate(attribute, value)
    }

    fn allow_nil(&self) -> bool {
        self.options.allow_nil.unwrap_or(false)
    }

    fn allow_blank(&self) -> bool {
        self.options.allow_blank.unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "url"
    }
}
