//! Integration tests for loading catalogs from disk

use std::fs;
use validates_url_i18n::*;

fn write(dir: &std::path::Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "de.json",
        r#"{"errors": {"messages": {"url": "ist keine gültige URL"}}}"#,
    );
    write(
        dir.path(),
        "fr-CA.json",
        r#"{"fr-CA": {"errors": {"messages": {"url": "n'est pas un URL valide"}}}}"#,
    );
    write(dir.path(), "README.txt", "not a catalog");

    let i18n = I18n::new()
        .with_builtin_messages()
        .load_from_dir(dir.path())
        .unwrap();

    assert_eq!(i18n.t("errors.messages.url", &Locale::de()), "ist keine gültige URL");
    assert_eq!(
        i18n.t("errors.messages.url", &Locale::parse("fr-CA").unwrap()),
        "n'est pas un URL valide"
    );
    // Keys missing from de come from the default locale
    assert_eq!(
        i18n.t("errors.messages.host", &Locale::de()),
        "has an invalid or local host"
    );
}

#[test]
fn test_non_locale_file_names_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "en.json", r#"{"errors": {"messages": {"url": "bad link"}}}"#);
    write(dir.path(), "shared-strings.json", r#"{"title": "x"}"#);

    let mut messages = Messages::new();
    let loaded = messages.load_from_dir(dir.path()).unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(messages.locales().count(), 1);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "en.json", "{ not json");

    let result = I18n::new().load_from_dir(dir.path());
    assert!(matches!(result, Err(I18nError::JsonError(_))));
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let result = I18n::new().load_from_dir(dir.path().join("missing"));
    assert!(matches!(result, Err(I18nError::NotFound(_))));
}

#[test]
fn test_load_single_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "en.json",
        r#"{"errors": {"messages": {"schema": "must use http or https"}}}"#,
    );

    let i18n = I18n::new()
        .with_builtin_messages()
        .load_file(dir.path().join("en.json"))
        .unwrap();

    assert_eq!(
        i18n.t("errors.messages.schema", &Locale::en_us()),
        "must use http or https"
    );
    assert_eq!(i18n.t("errors.messages.url", &Locale::en()), "is not a valid URL");
}
