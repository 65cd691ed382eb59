//! Rule evaluation benchmarks
//!
//! The engine is a linear scan over the rule list with alias lookups per
//! candidate, so throughput should degrade roughly linearly with rule count.

use creto_rules::{AliasKind, AuthorizationBuilder, AuthorizationContext, Rule};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_context(rule_count: usize) -> AuthorizationContext {
    let mut builder = AuthorizationBuilder::new();
    for i in 0..rule_count {
        let rule = Rule::new(
            format!("action-{}", i % 16),
            format!("Subject-{}", i % 64),
            None,
            i % 7 == 0,
        )
        .unwrap();
        builder = builder.rule(rule);
    }
    builder.build()
}

fn bench_allowed(c: &mut Criterion) {
    let mut group = c.benchmark_group("allowed");

    for rule_count in [10, 100, 1000].iter() {
        let context = create_context(*rule_count);

        group.bench_with_input(
            BenchmarkId::new("rules", rule_count),
            rule_count,
            |b, _| {
                b.iter(|| {
                    let outcome =
                        context.allowed(black_box("action-3"), black_box("Subject-3"));
                    black_box(outcome);
                });
            },
        );
    }

    group.finish();
}

fn bench_alias_expansion(c: &mut Criterion) {
    let context = AuthorizationBuilder::new()
        .allow("Manage", "Project")
        .unwrap()
        .alias(
            "Manage",
            &["Create", "Update", "Delete", "Archive", "Restore"],
            AliasKind::Action,
        )
        .unwrap()
        .build();

    c.bench_function("allowed_via_alias", |b| {
        b.iter(|| {
            let outcome = context.allowed(black_box("Restore"), black_box("Project"));
            black_box(outcome);
        });
    });
}

fn bench_match_rules(c: &mut Criterion) {
    let context = create_context(1000);

    c.bench_function("match_rules_1000", |b| {
        b.iter(|| {
            let matched =
                context.match_rules(black_box("action-3"), black_box("Subject-3"), None);
            black_box(matched.len());
        });
    });
}

criterion_group!(benches, bench_allowed, bench_alias_expansion, bench_match_rules);
criterion_main!(benches);
