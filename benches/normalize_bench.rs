//! Criterion benchmarks for the booking normalizer

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use salonbook::services::{display_string, parse_price, BookingNormalizer, StatsAggregator};
use salonbook::storage::{MemoryStore, CLIENT_BOOKINGS_KEY, MANUAL_BOOKINGS_KEY};
use salonbook::types::LooseValue;
use serde_json::json;
use std::hint::black_box;

/// Build `n` client and `n` manual records with mixed field shapes
fn make_collections(n: usize) -> (String, String) {
    let client: Vec<_> = (0..n)
        .map(|i| {
            let service = if i % 2 == 0 {
                json!({"name": "Corte", "price": format!("{},50€", i % 60)})
            } else {
                json!("Manicure")
            };
            let professional = if i % 3 == 0 {
                json!("agent")
            } else {
                json!({"id": format!("p{}", i % 4), "name": "Joana"})
            };
            let status = if i % 5 == 0 { "completed" } else { "confirmed" };
            json!({
                "id": format!("a{}", i),
                "date": format!("2024-06-{:02}", i % 28 + 1),
                "time": format!("{:02}:00", 9 + i % 9),
                "userName": format!("Cliente {}", i % 200),
                "service": service,
                "professional": professional,
                "status": status
            })
        })
        .collect();

    let manual: Vec<_> = (0..n)
        .map(|i| {
            json!({
                "id": format!("m{}", i),
                "date": format!("2024-06-{:02}", i % 28 + 1),
                "time": format!("{:02}:30", 9 + i % 9),
                "client": format!("Cliente {}", i % 150),
                "service": {"title": "Coloração"},
                "priceValue": i % 90,
                "status": "completed",
                "proId": format!("p{}", i % 4)
            })
        })
        .collect();

    (
        serde_json::to_string(&client).unwrap_or_default(),
        serde_json::to_string(&manual).unwrap_or_default(),
    )
}

fn bench_load_and_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalizer");

    for size in [100usize, 1_000, 10_000] {
        let (client, manual) = make_collections(size);
        let normalizer = BookingNormalizer::new(MemoryStore::with_values([
            (CLIENT_BOOKINGS_KEY, client.clone()),
            (MANUAL_BOOKINGS_KEY, manual.clone()),
        ]));

        group.throughput(Throughput::Bytes((client.len() + manual.len()) as u64));
        group.bench_with_input(
            BenchmarkId::new("load_and_normalize", format!("{} records", size * 2)),
            &normalizer,
            |b, normalizer| {
                b.iter(|| black_box(normalizer.load_and_normalize()));
            },
        );
    }

    group.finish();
}

fn bench_compute_stats(c: &mut Criterion) {
    let (client, manual) = make_collections(5_000);
    let normalizer = BookingNormalizer::new(MemoryStore::with_values([
        (CLIENT_BOOKINGS_KEY, client),
        (MANUAL_BOOKINGS_KEY, manual),
    ]));
    let bookings = normalizer.load_and_normalize().bookings;

    let mut group = c.benchmark_group("stats");
    group.throughput(Throughput::Elements(bookings.len() as u64));
    group.bench_function("compute", |b| {
        b.iter(|| StatsAggregator::compute(black_box(&bookings)));
    });
    group.finish();
}

fn bench_field_resolution(c: &mut Criterion) {
    let service = LooseValue::from(json!({"name": "Corte", "price": "12,50€"}));
    let price = LooseValue::from("12,50€");

    let mut group = c.benchmark_group("fields");
    group.bench_function("display_string", |b| {
        b.iter(|| display_string(black_box(Some(&service))));
    });
    group.bench_function("parse_price", |b| {
        b.iter(|| parse_price(black_box(Some(&price))));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_load_and_normalize,
    bench_compute_stats,
    bench_field_resolution
);
criterion_main!(benches);
