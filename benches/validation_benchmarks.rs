use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::HashMap;
use std::hint::black_box;
use validates_url::*;

fn bench_url_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_rule");

    let valid_urls = [
        "https://example.com",
        "http://localhost:8080/path",
        "https://subdomain.example.com/path?query=value#fragment",
    ];
    let invalid_urls = ["not a url", "ftp://example.com", "http://intranet", ""];

    let rule = UrlValidator::default();
    let strict = UrlValidator::new(UrlRuleOptions::default().no_local(true));

    group.bench_function("valid_urls", |b| {
        b.iter(|| {
            for url in &valid_urls {
                black_box(rule.validate("homepage", black_box(url)));
            }
        })
    });

    group.bench_function("invalid_urls", |b| {
        b.iter(|| {
            for url in &invalid_urls {
                black_box(rule.validate("homepage", black_box(url)));
            }
        })
    });

    group.bench_function("no_local", |b| {
        b.iter(|| strict.validate("homepage", black_box("http://localhost:3000")))
    });

    group.finish();
}

fn bench_record_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_validation");

    let fields: Vec<String> = (0..20).map(|i| format!("link_{i}")).collect();
    let names: Vec<&str> = fields.iter().map(String::as_str).collect();
    let builder = ValidationBuilder::new().validates_url(&names, UrlRuleOptions::default());
    let data: HashMap<String, String> = fields
        .iter()
        .map(|f| (f.clone(), format!("https://{f}.example.com/")))
        .collect();

    group.bench_function("sequential_20_fields", |b| {
        b.iter(|| builder.validate(black_box(&data)))
    });

    let runtime = tokio::runtime::Runtime::new().unwrap();
    group.bench_function("parallel_20_fields", |b| {
        b.to_async(&runtime)
            .iter(|| async { builder.validate_parallel(black_box(&data)).await })
    });

    group.finish();
}

fn bench_messages(c: &mut Criterion) {
    let i18n = I18n::new().with_builtin_messages();
    let failures = UrlValidator::default().validate("homepage", "not a url");

    c.bench_function("render_url_message", |b| {
        b.iter(|| messages::full_message(black_box(&failures[0]), &i18n, &Locale::en_us()))
    });
}

criterion_group!(
    benches,
    bench_url_rule,
    bench_record_validation,
    bench_messages
);
criterion_main!(benches);
