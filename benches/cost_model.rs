use criterion::{criterion_group, criterion_main, Criterion};

use costwise_core::schema::{Collection, Database, Field, FieldKind};
use costwise_core::stats::Statistics;
use costwise_model::{CostEngine, FilterQuery, JoinQuery};

fn warehouse() -> (Database, Statistics) {
    let stock = Collection::new(
        "Stock",
        vec![
            Field::new("quantity", FieldKind::Integer),
            Field::new("location", FieldKind::String),
            Field::new("IDP", FieldKind::Integer),
            Field::new("IDW", FieldKind::Integer),
        ],
        20_000_000,
    )
    .with_primary_key(["IDP", "IDW"])
    .unwrap();
    let product = Collection::new(
        "Product",
        vec![
            Field::new("IDP", FieldKind::Integer),
            Field::new("name", FieldKind::String),
            Field::new("brand", FieldKind::String),
        ],
        100_000,
    );
    let db = Database::new("warehouse", vec![stock, product]);
    let stats = Statistics::default()
        .with_distinct("Stock", "IDP", 100_000)
        .with_distinct("Stock", "IDW", 200)
        .with_distinct("Product", "brand", 5_000);
    (db, stats)
}

fn bench_filter_operator(c: &mut Criterion) {
    let (db, stats) = warehouse();
    let engine = CostEngine::new(&db, &stats);
    let query = FilterQuery::new("Stock")
        .select(["quantity", "location"])
        .filter(["IDP", "IDW"])
        .sharding_key(["IDP"]);

    c.bench_function("filter_with_sharding", |b| {
        b.iter(|| engine.filter_with_sharding(&query).unwrap())
    });
}

fn bench_join_operator(c: &mut Criterion) {
    let (db, stats) = warehouse();
    let engine = CostEngine::new(&db, &stats);
    let query = JoinQuery::new("Stock", "Product", "IDP")
        .left_select(["quantity"])
        .right_select(["name"]);

    c.bench_function("nested_loop_without_sharding", |b| {
        b.iter(|| engine.nested_loop_without_sharding(&query).unwrap())
    });
}

criterion_group!(benches, bench_filter_operator, bench_join_operator);
criterion_main!(benches);
