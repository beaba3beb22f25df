// Copyright 2019 Developers of the Rand project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand_mt19937::Generator;

fn bench_engine(c: &mut Criterion) {
    let mut rng = Generator::new(42);
    c.bench_function("next_u32", |b| b.iter(|| black_box(rng.next_u32())));
    c.bench_function("standard_uniform", |b| {
        b.iter(|| black_box(rng.standard_uniform()))
    });
    c.bench_function("random_interval_1000", |b| {
        b.iter(|| black_box(rng.random_interval(1000)))
    });
}

fn bench_continuous(c: &mut Criterion) {
    let mut rng = Generator::new(42);
    c.bench_function("standard_normal", |b| {
        b.iter(|| black_box(rng.standard_normal()))
    });
    c.bench_function("standard_gamma_small_shape", |b| {
        b.iter(|| black_box(rng.standard_gamma(0.5)))
    });
    c.bench_function("standard_gamma_large_shape", |b| {
        b.iter(|| black_box(rng.standard_gamma(7.5)))
    });
    c.bench_function("vonmises", |b| b.iter(|| black_box(rng.vonmises(0.0, 2.0))));
}

fn bench_discrete(c: &mut Criterion) {
    let mut rng = Generator::new(42);
    c.bench_function("binomial_inversion", |b| {
        b.iter(|| black_box(rng.binomial(20, 0.25)))
    });
    c.bench_function("binomial_btpe_cached", |b| {
        b.iter(|| black_box(rng.binomial(10_000, 0.37)))
    });
    c.bench_function("poisson_mult", |b| b.iter(|| black_box(rng.poisson(3.0))));
    c.bench_function("poisson_ptrs", |b| b.iter(|| black_box(rng.poisson(100.0))));
    c.bench_function("hypergeometric_hrua", |b| {
        b.iter(|| black_box(rng.hypergeometric(1000, 500, 100)))
    });
}

criterion_group!(benches, bench_engine, bench_continuous, bench_discrete);
criterion_main!(benches);
