#![allow(missing_docs)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jscore::{decode_chunks_strict, decode_strict};

/// Deterministically builds a JSON document of exactly `target_len` bytes:
/// a single object with one string field padded out with `a`s.
fn make_json_payload(target_len: usize) -> String {
    let overhead = "{\"data\":\"\"}".len();
    assert!(target_len >= overhead);

    let mut s = String::with_capacity(target_len);
    s.push_str("{\"data\":\"");
    s.extend(std::iter::repeat_n('a', target_len - overhead));
    s.push_str("\"}");
    debug_assert_eq!(s.len(), target_len);
    s
}

fn run_single_shot(payload: &str) -> usize {
    let v = decode_strict(payload.as_bytes()).unwrap();
    v.as_object().map_or(0, std::collections::HashMap::len)
}

fn run_chunked(payload: &str, parts: usize) -> usize {
    let chunk_size = payload.len().div_ceil(parts);
    let chunks: Vec<&str> = payload
        .as_bytes()
        .chunks(chunk_size)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect();
    let v = decode_chunks_strict(chunks).unwrap();
    v.as_object().map_or(0, std::collections::HashMap::len)
}

fn bench_decode_throughput(c: &mut Criterion) {
    let payload = make_json_payload(10_000);

    let mut group = c.benchmark_group("decode_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(5));

    group.bench_function("single_shot", |b| {
        b.iter(|| {
            let v = run_single_shot(black_box(&payload));
            black_box(v);
        });
    });

    for &parts in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("chunked", parts), &parts, |b, &p| {
            b.iter(|| {
                let v = run_chunked(black_box(&payload), p);
                black_box(v);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode_throughput);
criterion_main!(benches);
