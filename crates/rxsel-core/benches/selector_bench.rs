//! Benchmarks for selector hits, misses and list construction.
//!
//! Run with: cargo bench -p rxsel-core

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rxsel_core::list::{ListCombiner, SelectorOptions, extractor};
use rxsel_core::{Selector, SelectorBuilder, ValueEq};
use std::hint::black_box;
use std::sync::Arc;

#[derive(Clone)]
struct Shop {
    prices: Arc<Vec<f64>>,
    tax_percent: f64,
    tick: u64,
}

fn shop(len: usize) -> Shop {
    Shop {
        prices: Arc::new((0..len).map(|i| i as f64 * 0.25).collect()),
        tax_percent: 8.0,
        tick: 0,
    }
}

fn tax_selector() -> Selector<Shop, f64, (Arc<Vec<f64>>, f64)> {
    SelectorBuilder::new()
        .input(|s: &Shop| Arc::clone(&s.prices))
        .input(|s: &Shop| s.tax_percent)
        .build(|prices, tax| prices.iter().sum::<f64>() * (tax / 100.0))
}

// ============================================================================
// Hit vs miss
// ============================================================================

fn bench_hit_vs_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/typed");

    for len in [16, 1_024, 65_536] {
        let state = shop(len);

        let selector = tax_selector();
        selector.select(&state);
        group.bench_with_input(BenchmarkId::new("hit", len), &state, |b, state| {
            b.iter(|| black_box(selector.select(black_box(state))))
        });

        let selector = tax_selector();
        let mut flip = state.clone();
        group.bench_with_input(BenchmarkId::new("miss", len), &(), |b, _| {
            b.iter(|| {
                flip.tick += 1;
                flip.tax_percent = if flip.tick % 2 == 0 { 8.0 } else { 20.0 };
                black_box(selector.select(&flip))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Equality strategies
// ============================================================================

fn bench_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/equality");

    for len in [16, 1_024, 65_536] {
        let state = shop(len);

        let identity = tax_selector();
        identity.select(&state);
        group.bench_with_input(BenchmarkId::new("identity_hit", len), &state, |b, state| {
            b.iter(|| black_box(identity.select(black_box(state))))
        });

        let by_value = SelectorBuilder::new()
            .input(|s: &Shop| Arc::clone(&s.prices))
            .input(|s: &Shop| s.tax_percent)
            .equality(ValueEq)
            .build(|prices, tax| prices.iter().sum::<f64>() * (tax / 100.0));
        by_value.select(&state);
        // Fresh allocation with equal contents: ValueEq walks the whole Vec.
        let copy = Shop {
            prices: Arc::new(state.prices.as_ref().clone()),
            ..state.clone()
        };
        group.bench_with_input(BenchmarkId::new("value_eq_hit", len), &copy, |b, copy| {
            b.iter(|| black_box(by_value.select(black_box(copy))))
        });
    }

    group.finish();
}

// ============================================================================
// List selectors
// ============================================================================

fn bench_list_arity(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector/list");

    for arity in [1_usize, 4, 9, 32] {
        let values: Vec<u64> = (0..arity as u64).collect();
        let extractors = (0..arity)
            .map(|i| extractor(move |s: &Vec<u64>| s[i]))
            .collect();
        let selector = Selector::from_list(
            extractors,
            ListCombiner::new(arity, |v: &[u64]| v.iter().sum::<u64>()),
            SelectorOptions::default(),
        )
        .expect("arity matches");
        selector.select(&values);

        group.bench_with_input(BenchmarkId::new("hit", arity), &values, |b, values| {
            b.iter(|| black_box(selector.select(black_box(values))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hit_vs_miss, bench_equality, bench_list_arity);

criterion_main!(benches);
