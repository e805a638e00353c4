// Per-field rule sets and record-level validation

use crate::{EachValidator, UrlRuleOptions, UrlValidator, ValidationErrors, ValidationFailure};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinError;
use validates_url_log::{debug, warn};

type ValidatorFn = Arc<dyn Fn(&str, &str) -> Vec<ValidationFailure> + Send + Sync>;

/// Adapts a closure to [`EachValidator`].
struct FnValidator(ValidatorFn);

impl EachValidator for FnValidator {
    fn validate_each(&self, attribute: &str, value: &str) -> Vec<ValidationFailure> {
        (self.0)(attribute, value)
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Validators attached to one attribute.
#[derive(Clone)]
pub struct ValidationRules {
    validators: Vec<Arc<dyn EachValidator>>,
    field: String,
}

impl ValidationRules {
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            validators: Vec::new(),
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<V>(self, validator: V) -> Self
    where
        V: EachValidator + 'static,
    {
        self.add_shared(Arc::new(validator))
    }

    /// Attach a validator instance that other fields may also use.
    pub fn add_shared(mut self, validator: Arc<dyn EachValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Attach a closure taking `(attribute, value)`.
    pub fn add_fn<F>(self, validator: F) -> Self
    where
        F: Fn(&str, &str) -> Vec<ValidationFailure> + Send + Sync + 'static,
    {
        self.add(FnValidator(Arc::new(validator)))
    }

    /// Attach a [`UrlValidator`] built from `options`.
    pub fn url(self, options: UrlRuleOptions) -> Self {
        self.add(UrlValidator::new(options))
    }

    /// Run every validator against `value`, where `None` is a missing value.
    ///
    /// A validator is skipped for `None` when it allows nil or blank, and for
    /// an empty or whitespace-only value when it allows blank. A missing value
    /// that is not skipped is checked as the empty string.
    pub fn validate(&self, value: Option<&str>) -> Result<(), Vec<ValidationFailure>> {
        let errors = run(&self.validators, &self.field, value);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn run(
    validators: &[Arc<dyn EachValidator>],
    field: &str,
    value: Option<&str>,
) -> Vec<ValidationFailure> {
    let mut errors = Vec::new();

    for validator in validators {
        let skip = match value {
            None => validator.allow_nil() || validator.allow_blank(),
            Some(v) => validator.allow_blank() && v.trim().is_empty(),
        };
        if skip {
            debug!(
                target: "validates_url::rules",
                "{}: skipping {} for blank value",
                field,
                validator.name()
            );
            continue;
        }

        let failures = validator.validate_each(field, value.unwrap_or_default());
        for failure in &failures {
            debug!(
                target: "validates_url::rules",
                "{}: {} rejected with {}",
                field,
                validator.name(),
                failure.kind
            );
        }
        errors.extend(failures);
    }

    errors
}

/// Unwrap a finished field task. A panic inside a validator is resumed on
/// the caller; a cancelled task has no result.
fn joined<T>(joined: Result<T, JoinError>) -> Option<T> {
    match joined {
        Ok(result) => Some(result),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!(target: "validates_url::rules", "field validation task cancelled: {}", e);
            None
        }
    }
}

/// Validates a whole record, given as attribute name to value.
///
/// ```
/// use std::collections::HashMap;
/// use validates_url_core::{UrlRuleOptions, ValidationBuilder};
///
/// let validator = ValidationBuilder::new()
///     .validates_url(&["homepage"], UrlRuleOptions::default())
///     .validates_url(&["ftp_site"], UrlRuleOptions::default().with_schemes(["ftp"]).allow_blank(true));
///
/// let mut record = HashMap::new();
/// record.insert("homepage".to_string(), "https://example.com".to_string());
/// assert!(validator.validate(&record).is_ok());
/// ```
pub struct ValidationBuilder {
    rules: Vec<ValidationRules>,
}

impl ValidationBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add rules for a field. Rules for a field already present are appended
    /// to it.
    pub fn field(mut self, rules: ValidationRules) -> Self {
        match self.rules.iter_mut().find(|r| r.field == rules.field) {
            Some(existing) => existing.validators.extend(rules.validators),
            None => self.rules.push(rules),
        }
        self
    }

    /// Validate each of `attributes` as a URL, sharing one rule instance.
    pub fn validates_url(self, attributes: &[&str], options: UrlRuleOptions) -> Self {
        let rule: Arc<dyn EachValidator> = Arc::new(UrlValidator::new(options));

        attributes.iter().fold(self, |builder, attribute| {
            builder.field(ValidationRules::for_field(*attribute).add_shared(Arc::clone(&rule)))
        })
    }

    pub fn rules(&self) -> &[ValidationRules] {
        &self.rules
    }

    /// Validate all fields. A field missing from `data` is treated as nil.
    pub fn validate(&self, data: &HashMap<String, String>) -> Result<(), ValidationErrors> {
        let mut all_errors = ValidationErrors::default();

        for rule in &self.rules {
            let value = data.get(&rule.field).map(String::as_str);
            all_errors.extend(run(&rule.validators, &rule.field, value));
        }

        if all_errors.is_empty() {
            Ok(())
        } else {
            Err(all_errors)
        }
    }

    /// Validate all fields concurrently, one task per field.
    ///
    /// Failures come back in declaration order, exactly as [`validate`](Self::validate)
    /// would return them.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use validates_url_core::*;
    /// # use std::collections::HashMap;
    /// # async fn example() -> Result<(), ValidationErrors> {
    /// let validator = ValidationBuilder::new()
    ///     .validates_url(&["homepage", "blog", "docs"], UrlRuleOptions::default());
    ///
    /// let mut data = HashMap::new();
    /// data.insert("homepage".to_string(), "https://example.com".to_string());
    /// data.insert("blog".to_string(), "https://blog.example.com".to_string());
    /// data.insert("docs".to_string(), "https://docs.example.com".to_string());
    ///
    /// validator.validate_parallel(&data).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate_parallel(
        &self,
        data: &HashMap<String, String>,
    ) -> Result<(), ValidationErrors> {
        use tokio::task::JoinSet;

        let mut set = JoinSet::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let value = data.get(&rule.field).cloned();
            let field = rule.field.clone();
            let validators = rule.validators.clone();

            set.spawn(async move { (index, run(&validators, &field, value.as_deref())) });
        }

        let mut results = Vec::with_capacity(self.rules.len());
        while let Some(result) = set.join_next().await {
            results.extend(joined(result));
        }
        results.sort_by_key(|(index, _)| *index);

        let all_errors: ValidationErrors = results
            .into_iter()
            .flat_map(|(_, errors)| errors)
            .collect::<Vec<_>>()
            .into();

        if all_errors.is_empty() {
            Ok(())
        } else {
            Err(all_errors)
        }
    }
}

impl Default for ValidationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;

    fn kinds(result: Result<(), Vec<ValidationFailure>>) -> Vec<FailureKind> {
        result.err().unwrap_or_default().into_iter().map(|f| f.kind).collect()
    }

    #[test]
    fn test_nil_without_allow_nil_is_a_url_failure() {
        let rules = ValidationRules::for_field("homepage").url(UrlRuleOptions::default());
        assert_eq!(kinds(rules.validate(None)), vec![FailureKind::Url]);
    }

    #[test]
    fn test_allow_nil() {
        let rules =
            ValidationRules::for_field("homepage").url(UrlRuleOptions::default().allow_nil(true));
        assert!(rules.validate(None).is_ok());
        assert_eq!(kinds(rules.validate(Some(""))), vec![FailureKind::Url]);
    }

    #[test]
    fn test_allow_blank() {
        let rules =
            ValidationRules::for_field("homepage").url(UrlRuleOptions::default().allow_blank(true));
        assert!(rules.validate(None).is_ok());
        assert!(rules.validate(Some("")).is_ok());
        assert!(rules.validate(Some("  \t")).is_ok());
        assert_eq!(kinds(rules.validate(Some("nope"))), vec![FailureKind::Url]);
    }

    #[test]
    fn test_closure_validator() {
        let rules = ValidationRules::for_field("homepage")
            .url(UrlRuleOptions::default())
            .add_fn(|attribute, value| {
                if value.len() > 30 {
                    vec![ValidationFailure::new(attribute, FailureKind::Url)]
                } else {
                    Vec::new()
                }
            });

        assert_eq!(rules.len(), 2);
        assert!(rules.validate(Some("https://example.com")).is_ok());
        assert_eq!(
            kinds(rules.validate(Some("https://example.com/a/rather/long/path"))),
            vec![FailureKind::Url]
        );
    }

    #[test]
    fn test_failures_unchanged_with_debug_logging() {
        validates_url_log::set_debug(true);
        let rules = ValidationRules::for_field("homepage").url(UrlRuleOptions::default());
        let result = rules.validate(Some("ftp://example.com"));
        validates_url_log::set_debug(false);

        assert_eq!(kinds(result), vec![FailureKind::Schema]);
    }

    #[tokio::test]
    async fn test_cancelled_task_is_skipped() {
        let handle = tokio::spawn(async {
            std::future::pending::<()>().await;
            (0usize, Vec::<ValidationFailure>::new())
        });
        handle.abort();
        let result = handle.await;

        assert!(result.as_ref().is_err_and(|e| e.is_cancelled()));
        assert!(joined(result).is_none());
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let builder = ValidationBuilder::new()
            .validates_url(&["homepage", "blog"], UrlRuleOptions::default().no_local(true))
            .validates_url(&["docs"], UrlRuleOptions::default());
        let data = HashMap::from([
            ("homepage".to_string(), "http://localhost".to_string()),
            ("blog".to_string(), "https://blog.example.com".to_string()),
            ("docs".to_string(), "https://example.com/%zz".to_string()),
        ]);

        let sequential = builder.validate(&data).unwrap_err();
        let parallel = builder.validate_parallel(&data).await.unwrap_err();
        assert_eq!(parallel.kinds_for("docs"), vec![FailureKind::Url]);
        assert_eq!(parallel.to_json(), sequential.to_json());
    }

    #[test]
    fn test_builder_merges_rules_for_same_field() {
        let builder = ValidationBuilder::new()
            .validates_url(&["homepage"], UrlRuleOptions::default())
            .field(ValidationRules::for_field("homepage").add_fn(|_, _| Vec::new()));

        assert_eq!(builder.rules().len(), 1);
        assert_eq!(builder.rules()[0].len(), 2);
    }

    #[test]
    fn test_builder_missing_field_is_nil() {
        let builder = ValidationBuilder::new()
            .validates_url(&["homepage", "blog"], UrlRuleOptions::default().allow_nil(true))
            .validates_url(&["docs"], UrlRuleOptions::default());

        let data = HashMap::from([("blog".to_string(), "gopher://example.com".to_string())]);

        let errors = builder.validate(&data).unwrap_err();
        assert!(errors.kinds_for("homepage").is_empty());
        assert_eq!(errors.kinds_for("blog"), vec![FailureKind::Schema]);
        assert_eq!(errors.kinds_for("docs"), vec![FailureKind::Url]);
    }
}
