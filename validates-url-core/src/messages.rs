// Rendering failures through a message catalog

use crate::ValidationFailure;
use serde_json::Value;
use validates_url_i18n::{ERROR_MESSAGES_SCOPE, I18n, Locale, interpolate};

/// Render the message for `failure` in `locale`.
///
/// The catalog key is `errors.messages.<message_key>`. A configured
/// `message` that is not a catalog key is used as literal text. Context
/// entries and `attribute` are available as `%{name}` placeholders.
pub fn render(failure: &ValidationFailure, i18n: &I18n, locale: &Locale) -> String {
    let key = failure.message_key();
    let template = i18n
        .lookup(&format!("{}.{}", ERROR_MESSAGES_SCOPE, key), locale)
        .unwrap_or_else(|| key.to_string());

    let values: Vec<(&str, String)> = failure
        .context
        .iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (name.as_str(), text)
        })
        .chain(std::iter::once(("attribute", failure.attribute.clone())))
        .collect();
    let args: Vec<(&str, &str)> = values
        .iter()
        .map(|(name, text)| (*name, text.as_str()))
        .collect();

    interpolate(&template, &args)
}

/// `"<attribute> <message>"`, as shown in a form's error summary.
pub fn full_message(failure: &ValidationFailure, i18n: &I18n, locale: &Locale) -> String {
    format!("{} {}", failure.attribute, render(failure, i18n, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FailureKind, UrlRuleOptions, UrlValidator};
    use validates_url_i18n::MessageBundle;

    fn i18n() -> I18n {
        I18n::new().with_builtin_messages()
    }

    #[test]
    fn test_url_failure_message() {
        let rule = UrlValidator::default();
        let failures = rule.validate("homepage", "nope");
        assert_eq!(
            full_message(&failures[0], &i18n(), &Locale::en_us()),
            "homepage is not a valid URL"
        );
    }

    #[test]
    fn test_host_failure_uses_configured_message_key() {
        let rule = UrlValidator::new(UrlRuleOptions::default().no_local(true));
        let failures = rule.validate("homepage", "http://localhost");
        assert_eq!(failures[0].kind, FailureKind::Host);
        assert_eq!(render(&failures[0], &i18n(), &Locale::en()), "is not a valid URL");
    }

    #[test]
    fn test_schema_failure_message() {
        let rule = UrlValidator::default();
        let failures = rule.validate("homepage", "ftp://example.com");
        assert_eq!(
            render(&failures[0], &i18n(), &Locale::en()),
            "has a scheme that is not allowed"
        );
    }

    #[test]
    fn test_literal_custom_message() {
        let rule = UrlValidator::new(
            UrlRuleOptions::default().with_message("must be a link, got %{value}"),
        );
        let failures = rule.validate("homepage", "nope");
        assert_eq!(
            render(&failures[0], &i18n(), &Locale::en()),
            "must be a link, got nope"
        );
    }

    #[test]
    fn test_localized_message_with_value() {
        let i18n = i18n();
        let mut de = MessageBundle::new();
        de.add("errors.messages.url", "%{value} ist keine gültige URL");
        i18n.add_bundle(&Locale::de(), de);

        let failures = UrlValidator::default().validate("homepage", "not a url");
        assert_eq!(
            render(&failures[0], &i18n, &Locale::parse("de-AT").unwrap()),
            "not a url ist keine gültige URL"
        );
    }
}
