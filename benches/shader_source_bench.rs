use std::hint::black_box;

use builtin_shaders::{Address, BuiltinShaderCache, Filter, ShaderGenerator, ShaderOptions};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_shader_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("builtin_shaders");

    group.bench_function("generate_all", |b| {
        b.iter(|| {
            for options in ShaderOptions::all() {
                black_box(ShaderGenerator::generate_shader(black_box(options)));
            }
        });
    });

    let cache = BuiltinShaderCache::new();
    let _ = cache.append_shader_sources(Vec::new());

    group.bench_function("cached_lookup", |b| {
        b.iter(|| {
            black_box(cache.shader_source(
                black_box(Filter::Linear),
                black_box(Address::Repeat),
                black_box(true),
            ))
        });
    });

    group.bench_function("append_all", |b| {
        b.iter(|| black_box(cache.append_shader_sources(Vec::with_capacity(14))));
    });

    group.finish();
}

criterion_group!(benches, bench_shader_sources);
criterion_main!(benches);
