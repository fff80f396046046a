use criterion::{black_box, criterion_group, criterion_main, Criterion};
use verdict_spec::{Spec, Specification};

fn threshold(limit: i64) -> Specification<i64> {
    Spec::build(move |n: &i64| *n > limit)
        .create(format!("above {limit}"))
        .expect("threshold")
}

fn bench_evaluate(c: &mut Criterion) {
    let is_even = Spec::build(|n: &i64| n % 2 == 0).create("is even").expect("even");
    let composite = &(&is_even & &threshold(10)) | &!(&threshold(100) ^ &threshold(1000));
    c.bench_function("composite_evaluate", |b| {
        b.iter(|| {
            let result = composite.is_satisfied_by(black_box(&512)).expect("evaluate");
            black_box(result.satisfied())
        })
    });
    c.bench_function("composite_evaluate_and_explain", |b| {
        b.iter(|| {
            let result = composite.is_satisfied_by(black_box(&513)).expect("evaluate");
            black_box(result.justification().len())
        })
    });

    let all_even = is_even.as_all_satisfied().create("all even").expect("quantifier");
    let items: Vec<i64> = (0..1_000).map(|n| n * 2).collect();
    c.bench_function("all_satisfied_1000", |b| {
        b.iter(|| {
            let result = all_even.is_satisfied_by(black_box(&items)).expect("evaluate");
            black_box(result.description().causal_operand_count)
        })
    });
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
