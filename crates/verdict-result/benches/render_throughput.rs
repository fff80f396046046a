use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use verdict_core::Notation;
use verdict_result::{BooleanResult, Declaration};

fn atom(name: String, satisfied: bool) -> BooleanResult<String> {
    let notation = Arc::new(Notation::default());
    BooleanResult::atomic(satisfied, Declaration::fallback(name, notation, satisfied))
}

fn wide_tree(width: usize) -> BooleanResult<String> {
    let groups: Vec<_> = (0..width)
        .map(|group| {
            let members = (0..4)
                .map(|idx| atom(format!("g{group}m{idx}"), (group + idx) % 3 != 0))
                .collect();
            BooleanResult::any_of(members).expect("group")
        })
        .collect();
    BooleanResult::all_of(groups).expect("tree")
}

fn bench_render(c: &mut Criterion) {
    let tree = wide_tree(64);
    let notation = Notation::default();
    c.bench_function("reason_64x4", |b| {
        b.iter(|| black_box(tree.reason_with(black_box(&notation))))
    });
    c.bench_function("justification_64x4", |b| {
        b.iter(|| black_box(tree.justification_with(black_box(&notation))))
    });
    c.bench_function("compose_and_describe_64x4", |b| {
        b.iter(|| {
            let tree = wide_tree(64);
            black_box(tree.description().causal_operand_count)
        })
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
