use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use portfolio_api::storage::{Collection, Record, Store};
use serde_json::json;

fn skill(n: usize) -> Record {
    Record::try_from(json!({ "name": format!("skill-{}", n), "category": "backend", "level": n % 100 }))
        .unwrap()
}

fn filled_store(size: usize) -> Store {
    let store = Store::new();
    for n in 0..size {
        store.create(Collection::Skills, skill(n)).unwrap();
    }
    store
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("create_skill", |b| {
        b.iter_batched(Store::new, |store| store.create(Collection::Skills, skill(1)), BatchSize::SmallInput)
    });

    let store = filled_store(500);
    let last_id = store.find_all(Collection::Skills)[499].id().unwrap().to_string();

    c.bench_function("find_by_id_500", |b| {
        b.iter(|| store.find_by_id(Collection::Skills, black_box(&last_id)))
    });

    c.bench_function("find_all_500", |b| b.iter(|| store.find_all(black_box(Collection::Skills))));

    c.bench_function("update_500", |b| {
        b.iter(|| store.update(Collection::Skills, &last_id, skill(7)))
    });

    c.bench_function("record_project_view", |b| {
        b.iter(|| store.record_project_view(black_box("project-1")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
