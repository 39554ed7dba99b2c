//! Criterion comparison of query latency against the engine directly vs. through the
//! relay worker and client, so the numbers isolate message-passing overhead.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_relay::prelude::*;
use std::hint::black_box;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("create tokio runtime"));

/// Resolve how many lookups each iteration should perform.
fn lookup_count() -> i64 {
    std::env::var("BENCH_LOOKUPS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(200)
}

fn seed_sql(rows: i64) -> String {
    let mut sql = String::from("CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT NOT NULL);");
    for id in 1..=rows {
        sql.push_str(&format!("INSERT INTO test VALUES ({id}, 'name-{id}');"));
    }
    sql
}

fn benchmark_engine_direct(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    lookups: i64,
) {
    let mut engine = SqliteLoader::default().load().expect("load engine");
    engine.run(&seed_sql(lookups)).expect("seed engine");

    group.bench_function(BenchmarkId::new("engine", lookups), |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::default();
            for _ in 0..iters {
                let start = Instant::now();
                for id in 1..=lookups {
                    let rows = engine
                        .exec(&format!("SELECT id, name FROM test WHERE id = {id}"))
                        .expect("query");
                    black_box(rows);
                }
                total += start.elapsed();
            }
            total
        });
    });
}

fn benchmark_relay(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    lookups: i64,
) {
    let runtime = &*TOKIO_RUNTIME;
    let client = runtime.block_on(async {
        let relay = Relay::sqlite_builder().build().expect("spawn relay");
        let client = RelayClient::new(relay).expect("start client");
        client.init().await.expect("init");
        client.execute(seed_sql(lookups)).await.expect("seed relay");
        client
    });

    group.bench_function(BenchmarkId::new("relay", lookups), |b| {
        b.iter_custom(|iters| {
            runtime.block_on(async {
                let mut total = Duration::default();
                for _ in 0..iters {
                    let start = Instant::now();
                    for id in 1..=lookups {
                        let rows = client
                            .query(format!("SELECT id, name FROM test WHERE id = {id}"))
                            .await
                            .expect("query");
                        black_box(rows);
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    });
}

fn relay_round_trip(c: &mut Criterion) {
    let lookups = lookup_count();
    let mut group = c.benchmark_group("relay_round_trip");
    group.throughput(Throughput::Elements(lookups.unsigned_abs()));
    benchmark_engine_direct(&mut group, lookups);
    benchmark_relay(&mut group, lookups);
    group.finish();
}

criterion_group!(benches, relay_round_trip);
criterion_main!(benches);
