//! Benchmarks for talent grid classification and wizard validation.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use growth_core::{CompetencyId, EvaluationWizard, Individual, Score, TalentGrid};
use std::hint::black_box;

fn population(n: u64) -> Vec<Individual> {
    (0..n)
        .map(|i| {
            let perf = (i * 37 % 101) as f64;
            let pot = (i * 53 % 101) as f64;
            Individual::new(i, format!("Person {i}"), perf, pot)
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let people = population(10_000);
    c.bench_function("classify_10k", |b| {
        b.iter(|| TalentGrid::classify(black_box(&people)))
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut wizard = EvaluationWizard::default();
    let ids: Vec<CompetencyId> = wizard.catalog().competencies().map(|c| c.id.clone()).collect();
    for id in &ids {
        wizard.set_rating(id, Score::MAX).unwrap();
    }
    c.bench_function("validate_all_extreme", |b| {
        b.iter(|| black_box(&wizard).validate())
    });
}

criterion_group!(benches, bench_classify, bench_validate);
criterion_main!(benches);
