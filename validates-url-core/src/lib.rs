//! URL validation rule
//!
//! Checks that a string is a well-formed URL with an allowed scheme and,
//! optionally, a non-local host. Failures come back as data: an attribute,
//! a kind token (`url`, `host` or `schema`) and a context map for message
//! templates. Nothing is rendered or raised here.
//!
//! # Examples
//!
//! ## Checking a single value
//!
//! ```
//! use validates_url_core::{FailureKind, UrlRuleOptions, UrlValidator};
//!
//! let rule = UrlValidator::new(UrlRuleOptions::default().no_local(true));
//!
//! assert!(rule.validate("homepage", "https://example.com").is_empty());
//!
//! let failures = rule.validate("homepage", "http://localhost:3000");
//! assert_eq!(failures[0].kind, FailureKind::Host);
//! assert_eq!(failures[0].value(), Some("http://localhost:3000"));
//! ```
//!
//! ## Validating a record
//!
//! ```
//! use std::collections::HashMap;
//! use validates_url_core::{UrlRuleOptions, ValidationBuilder, FailureKind};
//!
//! let validator = ValidationBuilder::new()
//!     .validates_url(&["homepage"], UrlRuleOptions::default().allow_blank(true))
//!     .validates_url(&["ftp_site"], UrlRuleOptions::default().with_schemes(["ftp"]));
//!
//! let record = HashMap::from([
//!     ("homepage".to_string(), String::new()),
//!     ("ftp_site".to_string(), "http://files.example.com".to_string()),
//! ]);
//!
//! let errors = validator.validate(&record).unwrap_err();
//! assert_eq!(errors.kinds_for("ftp_site"), vec![FailureKind::Schema]);
//! ```
//!
//! ## Rendering messages
//!
//! ```
//! use validates_url_core::{UrlValidator, messages};
//! use validates_url_i18n::{I18n, Locale};
//!
//! let i18n = I18n::new().with_builtin_messages();
//! let failures = UrlValidator::default().validate("homepage", "nope");
//!
//! assert_eq!(
//!     messages::full_message(&failures[0], &i18n, &Locale::en()),
//!     "homepage is not a valid URL"
//! );
//! ```

mod errors;
pub mod messages;
mod options;
mod parse;
mod rules;
mod traits;
mod url_rule;

pub use errors::*;
pub use options::*;
pub use parse::*;
pub use rules::*;
pub use traits::*;
pub use url_rule::*;
