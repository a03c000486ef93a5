use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use teamhub_auth::{Role, TokenCodec, TokenTtls, TokenVerifier};
use teamhub_core::SystemClock;

fn codec() -> TokenCodec {
    TokenCodec::new(
        b"bench-secret-bench-secret-bench-secret!!",
        TokenTtls::default(),
        Arc::new(SystemClock),
    )
}

fn bench_issue(c: &mut Criterion) {
    let codec = codec();
    c.bench_function("issue_access", |b| {
        b.iter(|| codec.issue_access(black_box("a@x.com"), Role::Member).unwrap())
    });
}

fn bench_verify(c: &mut Criterion) {
    let codec = codec();
    let token = codec.issue_access("a@x.com", Role::Member).unwrap();
    c.bench_function("parse_access", |b| {
        b.iter(|| codec.parse_access(black_box(&token)).unwrap())
    });
}

criterion_group!(benches, bench_issue, bench_verify);
criterion_main!(benches);
