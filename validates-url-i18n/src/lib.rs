//! Message catalogs for URL validation failures
//!
//! Validation never renders text: a failure carries a kind token (`url`,
//! `host`, `schema`) and a context map. This crate turns those tokens into
//! localized messages.
//!
//! - **Explicit loading**: catalogs are registered by the application at
//!   startup, never as a side effect of using a validator
//! - **Locale fallback**: `en-US` → `en` → fallback locale → default locale
//! - **Interpolation**: `{name}` and `%{name}` placeholders
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use validates_url_i18n::{I18n, Locale};
//!
//! let i18n = I18n::new()
//!     .with_builtin_messages()
//!     .load_from_dir("config/locales")?;
//!
//! let msg = i18n.t_args("errors.messages.url", &Locale::de(), &[("value", "htp://x")]);
//! # Ok::<(), validates_url_i18n::I18nError>(())
//! ```

mod error;
mod interpolate;
mod locale;
mod messages;

pub use error::I18nError;
pub use interpolate::interpolate;
pub use locale::Locale;
pub use messages::{I18n, MessageBundle, Messages};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Key prefix under which failure-kind messages live.
pub const ERROR_MESSAGES_SCOPE: &str = "errors.messages";

pub mod prelude {
    pub use crate::{ERROR_MESSAGES_SCOPE, I18n, I18nError, Locale, MessageBundle, Result};
}
