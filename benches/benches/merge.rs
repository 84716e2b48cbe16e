// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_props` + `understory_handler`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;

use understory_handler::{Handler, HandlerCache};
use understory_props::{
    MergeOptions, PropValue, PropertySet, StyleMap, merge_root, merge_root_with,
};

type Event = u32;

fn typical_base() -> PropertySet<Event> {
    PropertySet::with_class_name("list-item")
        .with("data-automation-id", "item")
        .with("onClick", Handler::new(|_: &Event| {}))
        .with("onKeyDown", Handler::new(|_: &Event| {}))
        .with(
            "style",
            StyleMap::new().with("color", "black").with("padding", "4px"),
        )
        .with("role", "option")
}

fn typical_overrides() -> PropertySet<Event> {
    PropertySet::with_class_name("selected")
        .with("data-automation-id", "row-3")
        .with("data-index", "3")
        .with("onClick", Handler::new(|_: &Event| {}))
        .with("style", StyleMap::new().with("color", "blue"))
        .with("title", "ignored")
}

fn bench_merge(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: PropertySet<u32>={} PropValue<u32>={} StyleMap={}",
            core::mem::size_of::<PropertySet<Event>>(),
            core::mem::size_of::<PropValue<Event>>(),
            core::mem::size_of::<StyleMap>(),
        );
    });

    let base = typical_base();
    let overrides = typical_overrides();
    let options = MergeOptions::new();

    let mut group = c.benchmark_group("props/merge");

    group.bench_function("default_cache", |b| {
        b.iter(|| black_box(merge_root(&overrides, &base, &options)))
    });

    group.bench_function("explicit_cache", |b| {
        let mut cache = HandlerCache::new();
        b.iter(|| black_box(merge_root_with(&overrides, &base, &options, &mut cache)))
    });

    group.bench_function("excluding_handlers", |b| {
        let options = MergeOptions::excluding(["onClick", "onKeyDown"]);
        b.iter(|| black_box(merge_root(&overrides, &base, &options)))
    });

    group.finish();

    let mut group = c.benchmark_group("handler/compose");

    group.bench_function("hit", |b| {
        let mut cache = HandlerCache::new();
        let f = Handler::new(|_: &Event| {});
        let g = Handler::new(|_: &Event| {});
        let _held = cache.compose(&f, &g);
        b.iter(|| black_box(cache.compose(&f, &g)))
    });

    group.bench_function("miss", |b| {
        let mut cache = HandlerCache::new();
        let f = Handler::new(|_: &Event| {});
        b.iter_batched(
            || Handler::new(|_: &Event| {}),
            |g| black_box(cache.compose(&f, &g)),
            BatchSize::SmallInput,
        )
    });

    for live in [16_usize, 256] {
        group.bench_function(BenchmarkId::new("hit_with_live_entries", live), |b| {
            let mut cache = HandlerCache::new();
            let f = Handler::new(|_: &Event| {});
            let others: Vec<_> = (0..live).map(|_| Handler::new(|_: &Event| {})).collect();
            let _held: Vec<_> = others.iter().map(|g| cache.compose(&f, g)).collect();
            let g = &others[live / 2];
            b.iter(|| black_box(cache.compose(&f, g)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
