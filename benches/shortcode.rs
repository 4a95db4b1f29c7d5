//! 短码生成与校验基准测试

use std::collections::HashSet;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shorturl::utils::shortcode::{generate_unique, random_code, validate_custom};
use shorturl::utils::url_validator::validate_url;

fn bench_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortcode/random_code");
    for len in [4usize, 6, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| random_code(len));
        });
    }
    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortcode/validate");
    group.bench_function("custom_ok", |b| {
        b.iter(|| assert!(validate_custom("my-promo_2024")));
    });
    group.bench_function("custom_bad", |b| {
        b.iter(|| assert!(!validate_custom("no/slashes")));
    });
    group.bench_function("url", |b| {
        b.iter(|| assert!(validate_url("https://example.com/path?q=1").is_ok()));
    });
    group.finish();
}

fn bench_generate_unique(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    // 预先占用一批短码，模拟已有数据时的碰撞
    let taken: HashSet<String> = (0..1000).map(|_| random_code(4)).collect();

    c.bench_function("shortcode/generate_unique_len4", |b| {
        b.to_async(&rt).iter(|| {
            let taken = &taken;
            async move {
                generate_unique(4, |candidate| async move { Ok(taken.contains(&candidate)) })
                    .await
                    .expect("a free code exists")
            }
        });
    });
}

criterion_group!(
    benches,
    bench_random_code,
    bench_validate,
    bench_generate_unique
);
criterion_main!(benches);
