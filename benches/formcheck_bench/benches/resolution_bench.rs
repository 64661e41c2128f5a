//! Attribute resolution and templating benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formcheck_core::{expand, resolve, Attribute, ValidatorDef, ValidatorRegistry};

/// Benchmark resolving attributes into a field
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let registry = ValidatorRegistry::default();

    group.bench_function("native_attributes", |b| {
        let attrs = vec![
            Attribute::new("type", "email"),
            Attribute::new("name", "mail"),
            Attribute::new("required", ""),
            Attribute::new("maxlength", "120"),
        ];
        b.iter(|| black_box(resolve(black_box(&attrs), &registry)))
    });

    group.bench_function("custom_attributes", |b| {
        let mut registry = registry.clone();
        registry.register("between", ValidatorDef::new(|_, _, _| true));
        let attrs = vec![
            Attribute::new("data-formcheck-between", "3,9"),
            Attribute::new("data-formcheck-between-message", "Between ${1} and ${2}"),
            Attribute::new("data-formcheck-between-message-fr", "Entre ${1} et ${2}"),
            Attribute::new("data-formcheck-type", "integer"),
            Attribute::new("class", "form-control"),
        ];
        b.iter(|| black_box(resolve(black_box(&attrs), &registry)))
    });

    group.finish();
}

/// Benchmark placeholder expansion
fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    let args = vec!["hello world".to_string(), "5".to_string(), "10".to_string()];

    group.bench_function("no_placeholders", |b| {
        b.iter(|| black_box(expand(black_box("This field is required"), &args)))
    });

    group.bench_function("three_placeholders", |b| {
        b.iter(|| {
            black_box(expand(
                black_box("'${0}' must be between ${1} and ${2} characters"),
                &args,
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_expand);

criterion_main!(benches);
