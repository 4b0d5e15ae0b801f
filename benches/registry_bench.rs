#![allow(dead_code)]
//! 注册表解析的性能基准测试

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazy_registry::{Catalog, Registry, TypeDescriptor};

/// 测试用的简单服务
struct SimpleService {
    value: usize,
}

/// 构建一条长度为 `depth` 的绑定链：link-0 -> link-1 -> ... -> leaf
fn chained_catalog(depth: usize) -> Catalog {
    let mut catalog = Catalog::new()
        .with(TypeDescriptor::class("leaf").operation("create", |_| Ok(SimpleService { value: 42 })));
    for i in 0..depth {
        let next = if i + 1 == depth {
            "leaf".to_string()
        } else {
            format!("link-{}", i + 1)
        };
        catalog.insert(TypeDescriptor::interface(format!("link-{}", i)).constant("CREATED_BY", next));
    }
    catalog
}

/// 基准测试：缓存命中
fn bench_cached_resolution(c: &mut Criterion) {
    let mut registry = Registry::new(chained_catalog(1));
    registry.resolve("leaf").unwrap();

    c.bench_function("cached_resolution", |b| {
        b.iter(|| black_box(registry.resolve(black_box("leaf")).unwrap()))
    });
}

/// 基准测试：首次解析一条绑定链
fn bench_cold_chain_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_chain_resolution");

    for depth in [1usize, 10, 100].iter() {
        let catalog = std::sync::Arc::new(chained_catalog(*depth));
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, _| {
            b.iter(|| {
                let mut registry = Registry::new(catalog.clone());
                black_box(registry.resolve("link-0").unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cached_resolution, bench_cold_chain_resolution);
criterion_main!(benches);
