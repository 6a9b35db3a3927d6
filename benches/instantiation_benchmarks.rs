use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use type_templates::prelude::*;

fn bench_cache_hit(c: &mut Criterion) {
    let k = TemplateParam::new("K");
    let v = TemplateParam::new("V");
    let pair = Template::builder("Pair")
        .params([k.clone(), v.clone()])
        .build()
        .unwrap();
    pair.instantiate(&[Value::Int(1), Value::Int(2)]).unwrap();

    c.bench_function("instantiate_cache_hit", |b| {
        b.iter(|| {
            let ty = pair
                .instantiate(black_box(&[Value::Int(1), Value::Int(2)]))
                .unwrap();
            black_box(ty)
        })
    });
}

fn bench_cache_miss(c: &mut Criterion) {
    let k = TemplateParam::new("K");
    let pair = Template::builder("Box").param(&k).build().unwrap();

    let mut next = 0i64;
    c.bench_function("instantiate_cache_miss", |b| {
        b.iter(|| {
            next += 1;
            let ty = pair.instantiate(black_box(&[Value::Int(next)])).unwrap();
            black_box(ty)
        })
    });
}

fn bench_base_chain(c: &mut Criterion) {
    let t = TemplateParam::new("T");
    let mut current = Template::builder("Layer0").param(&t).build().unwrap();
    for depth in 1..8 {
        let base = current.apply(&[Arg::from(&t)]).unwrap().partial().unwrap();
        current = Template::builder(format!("Layer{depth}"))
            .param(&t)
            .base(base)
            .build()
            .unwrap();
    }

    let mut next = 0i64;
    c.bench_function("instantiate_eight_deep_chain", |b| {
        b.iter(|| {
            next += 1;
            let ty = current.instantiate(black_box(&[Value::Int(next)])).unwrap();
            black_box(ty)
        })
    });
}

fn bench_subtype_query(c: &mut Criterion) {
    let t = TemplateParam::new("T");
    let mut current = Template::builder("Layer0").param(&t).build().unwrap();
    let root = current.clone();
    for depth in 1..8 {
        let base = current.apply(&[Arg::from(&t)]).unwrap().partial().unwrap();
        current = Template::builder(format!("Layer{depth}"))
            .param(&t)
            .base(base)
            .build()
            .unwrap();
    }
    let leaf = current.instantiate(&[Value::Int(1)]).unwrap();

    c.bench_function("subtype_through_chain", |b| {
        b.iter(|| black_box(root.is_subtype(black_box(&leaf))))
    });
}

criterion_group!(
    benches,
    bench_cache_hit,
    bench_cache_miss,
    bench_base_chain,
    bench_subtype_query
);
criterion_main!(benches);
