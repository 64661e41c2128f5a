//! Validation throughput benchmarks
//!
//! Benchmarks full-form validation and single-field evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formcheck_core::{FormConfig, NullPresenter, Session, ValidationMode};
use formcheck_testing::{MockControl, MockForm, RecordingPresenter};

/// A signup-like form with `fields` text inputs
fn signup_form(fields: usize) -> MockForm {
    let form = MockForm::new();
    for i in 0..fields {
        let control = match i % 4 {
            0 => MockControl::text().attr("required", "").attr("minlength", "5"),
            1 => MockControl::input("email").attr("required", ""),
            2 => MockControl::input("number").attr("min", "18").attr("max", "120"),
            _ => MockControl::text().attr("pattern", r"/^[a-z0-9_]+$/i"),
        };
        form.add(control.name(format!("field{i}")).value("value_42"));
    }
    form
}

/// Benchmark validate_all over growing forms
fn bench_validate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_all");

    for size in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("silent", size), &size, |b, &size| {
            let mut session = Session::new(signup_form(size), NullPresenter, FormConfig::default());
            b.iter(|| black_box(session.validate_all(ValidationMode::Silent)))
        });

        group.bench_with_input(BenchmarkId::new("report", size), &size, |b, &size| {
            let mut session = Session::new(signup_form(size), RecordingPresenter::new(), FormConfig::default());
            b.iter(|| {
                let valid = session.validate_all(ValidationMode::Report);
                session.presenter().clear_calls();
                black_box(valid)
            })
        });
    }

    group.finish();
}

/// Benchmark single-field paths
fn bench_single_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_field");

    // Halting required on an empty value
    group.bench_function("required_halt", |b| {
        let form = MockForm::new();
        let id = form.add(
            MockControl::text()
                .attr("required", "")
                .attr("minlength", "5")
                .attr("pattern", r"/^\d+$/"),
        );
        let mut session = Session::builder(form).build();
        b.iter(|| black_box(session.validate_one(black_box(id), ValidationMode::Silent)))
    });

    // Every validator runs and fails
    group.bench_function("all_failing", |b| {
        let form = MockForm::new();
        let id = form.add(
            MockControl::text()
                .attr("minlength", "10")
                .attr("pattern", r"/^\d+$/")
                .attr("data-formcheck-pattern-message", "'${0}' must match ${1}")
                .value("abc"),
        );
        let mut session = Session::builder(form).build();
        b.iter(|| black_box(session.validate_one(black_box(id), ValidationMode::Silent)))
    });

    // Checkbox group counting
    group.bench_function("checkbox_group", |b| {
        let form = MockForm::new();
        let first = form.add(MockControl::checkbox().name("opt").attr("min", "2").checked(true));
        for _ in 0..15 {
            form.add(MockControl::checkbox().name("opt"));
        }
        let mut session = Session::builder(form).build();
        b.iter(|| black_box(session.validate_one(black_box(first), ValidationMode::Silent)))
    });

    group.finish();
}

criterion_group!(benches, bench_validate_all, bench_single_field);

criterion_main!(benches);
