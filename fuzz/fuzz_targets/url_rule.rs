//! Fuzz target for the URL rule.
//!
//! Arbitrary values and option combinations must never panic, and the rule
//! must return either a single `url` failure or at most one `host` and one
//! `schema` failure. Values the parser would only accept after stripping
//! whitespace or dropping tabs and newlines must get a single `url` failure.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use validates_url_core::{FailureKind, UrlRuleOptions, UrlValidator};

#[derive(Debug, Arbitrary)]
struct FuzzCase {
    value: String,
    schemes: Vec<String>,
    no_local: bool,
}

/// A `%` in the path or query not followed by two hex digits.
fn has_bad_escape(value: &str) -> bool {
    let Some(rest) = value.split_once("://").map(|(_, rest)| rest) else {
        return false;
    };
    let Some(start) = rest.find(['/', '?']) else {
        return false;
    };
    let tail = &rest[start..];
    let tail = tail.split('#').next().unwrap_or_default();
    tail.match_indices('%').any(|(i, _)| {
        let digits = tail.as_bytes().get(i + 1..i + 3);
        !matches!(digits, Some([a, b]) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit())
    })
}

fuzz_target!(|case: FuzzCase| {
    let options = UrlRuleOptions::default()
        .with_schemes(case.schemes)
        .no_local(case.no_local);
    let rule = UrlValidator::new(options);

    let failures = rule.validate("field", &case.value);
    let kinds: Vec<FailureKind> = failures.iter().map(|f| f.kind).collect();

    match kinds.as_slice() {
        [] | [FailureKind::Url] | [FailureKind::Host] | [FailureKind::Schema] => {}
        [FailureKind::Host, FailureKind::Schema] => {}
        other => panic!("unexpected failure sequence: {:?}", other),
    }

    let value = case.value.as_str();
    let trimmed = value.trim_matches(|c: char| c <= ' ');
    let repaired = trimmed.len() < value.len() || trimmed.contains(['\t', '\n', '\r']);
    if repaired {
        assert_eq!(kinds, vec![FailureKind::Url], "{:?}", value);
    }
    if has_bad_escape(trimmed) {
        assert_eq!(kinds, vec![FailureKind::Url], "{:?}", value);
    }

    for failure in &failures {
        assert!(!failure.context.contains_key("schemes"));
        assert!(!failure.context.contains_key("no_local"));
        if failure.kind != FailureKind::Schema {
            assert_eq!(failure.value(), Some(case.value.as_str()));
        }
    }

    assert_eq!(failures, rule.validate("field", &case.value));
});
