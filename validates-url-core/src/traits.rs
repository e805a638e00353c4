// Validation traits

use crate::ValidationFailure;

/// A validatable record.
pub trait Validate {
    /// Validate every attribute and return all failures, if any.
    fn validate(&self) -> Result<(), Vec<ValidationFailure>>;
}

/// A rule applied to one attribute value at a time.
///
/// The nil/blank skip policy is applied by the caller
/// ([`ValidationRules`](crate::ValidationRules)) before `validate_each` runs,
/// based on [`allow_nil`](Self::allow_nil) and [`allow_blank`](Self::allow_blank).
pub trait EachValidator: Send + Sync {
    /// Check `value` and return every failure found (empty when valid).
    fn validate_each(&self, attribute: &str, value: &str) -> Vec<ValidationFailure>;

    /// Skip missing values.
    fn allow_nil(&self) -> bool {
        false
    }

    /// Skip missing, empty and whitespace-only values.
    fn allow_blank(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}
