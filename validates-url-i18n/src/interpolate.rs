//! Placeholder substitution for catalog messages.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Matches `%{name}` and `{name}`.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%?\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder pattern"));

/// Replace every known placeholder in `template` with its argument.
///
/// Placeholders without a matching argument are left as written.
///
/// ```
/// use validates_url_i18n::interpolate;
///
/// let msg = interpolate("%{value} is not a valid URL", &[("value", "htp:/x")]);
/// assert_eq!(msg, "htp:/x is not a valid URL");
/// ```
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    if args.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            args.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
