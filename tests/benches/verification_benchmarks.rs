//! # Init-Data Verification Benchmarks
//!
//! Verification runs on every `/api/init` call; it should stay in the
//! low-microsecond range for realistic payloads.
//!
//! | Operation | Target |
//! |-----------|--------|
//! | verify (4 fields) | < 10µs |
//! | verify (64 fields) | < 50µs |
//! | parse query string | < 20µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use miniapp_auth::{
    constant_time_eq, derive_secret_key, verify_init_data, BotSecret, InitData,
};
use miniapp_tests::fixtures::{secret, signed, signed_with_fields, to_query};

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("init-data-verify");
    let secret = secret();

    let valid = signed(r#"{"id":1,"first_name":"Ada"}"#, &secret);
    group.bench_function("verify_valid", |b| {
        b.iter(|| black_box(verify_init_data(black_box(&valid), &secret)))
    });

    let forged = valid.clone().with("query_id", "AAB");
    group.bench_function("verify_forged", |b| {
        b.iter(|| black_box(verify_init_data(black_box(&forged), &secret)))
    });

    for extra in [0usize, 16, 60] {
        let data = signed_with_fields(extra, &secret);
        group.throughput(Throughput::Elements(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("verify_fields", data.len()), &data, |b, data| {
            b.iter(|| black_box(verify_init_data(data, &secret)))
        });
    }

    group.finish();
}

fn bench_building_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("init-data-parts");
    let secret = secret();
    let data = signed_with_fields(16, &secret);
    let query = to_query(&data);

    group.bench_function("derive_secret_key", |b| {
        b.iter(|| black_box(derive_secret_key(black_box(&secret))))
    });

    group.bench_function("data_check_string", |b| {
        b.iter(|| black_box(data.data_check_string()))
    });

    group.bench_function("from_query", |b| {
        b.iter(|| black_box(InitData::from_query(black_box(&query))))
    });

    let hash = data.hash().unwrap_or_default().to_string();
    let other = format!("{}0", &hash[..hash.len().saturating_sub(1)]);
    group.bench_function("constant_time_eq", |b| {
        b.iter(|| black_box(constant_time_eq(black_box(&hash), black_box(&other))))
    });

    let empty = BotSecret::default();
    group.bench_function("verify_unconfigured", |b| {
        b.iter(|| black_box(verify_init_data(black_box(&data), &empty)))
    });

    group.finish();
}

criterion_group!(benches, bench_verify, bench_building_blocks);
criterion_main!(benches);
