// validates-url - field-level URL validation
//
// Re-exports the rule, the message catalog and the logging macros so that
// applications depend on a single crate.

pub use validates_url_core::*;

pub use validates_url_i18n as i18n;
pub use validates_url_log as log;

pub use validates_url_i18n::{I18n, I18nError, Locale, MessageBundle};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        EachValidator, FailureKind, I18n, Locale, UrlRuleOptions, UrlValidator, Validate,
        ValidationBuilder, ValidationErrors, ValidationFailure, ValidationRules, messages,
    };
}
