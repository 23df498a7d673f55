// ABOUTME: Criterion benchmarks for unit normalization and calorie attribution
// ABOUTME: Measures conversion paths and batch attribution over mixed servings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the conversion engine.
//!
//! Covers same-family conversion, volume to weight with a density lookup,
//! and attribution over batches of servings.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use macro_tracker::intelligence::{CalorieAttributor, UnitConverter};
use macro_tracker::models::{FoodRecord, ServingSpec};

const UNITS: [&str; 6] = ["g", "oz", "cup", "tbsp", "serving", "slice"];

fn sample_servings(count: usize) -> Vec<ServingSpec> {
    (0..count)
        .filter_map(|index| {
            let amount = f64::from(u32::try_from(index % 7).unwrap_or(0)) * 0.5 + 0.5;
            ServingSpec::new(amount, UNITS[index % UNITS.len()]).ok()
        })
        .collect()
}

fn sample_foods() -> Vec<FoodRecord> {
    [
        ("cooked rice", 1.0, "cup", 206.0),
        ("chicken breast", 100.0, "g", 165.0),
        ("peanut butter", 2.0, "tbsp", 188.0),
        ("apple", 1.0, "medium", 95.0),
    ]
    .into_iter()
    .filter_map(|(name, qty, unit, calories)| FoodRecord::new(name, qty, unit, calories).ok())
    .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let converter = UnitConverter::default();

    group.bench_function("same_family_oz_to_g", |b| {
        b.iter(|| converter.normalize(black_box(4.0), "oz", "g", None));
    });

    group.bench_function("volume_to_weight_density_lookup", |b| {
        b.iter(|| converter.normalize(black_box(1.5), "cup", "g", Some("Cooked White Rice")));
    });

    group.bench_function("unknown_unit", |b| {
        b.iter(|| converter.normalize(black_box(2.0), "slice", "g", None));
    });

    group.finish();
}

fn bench_attribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("attribution");
    let attributor = CalorieAttributor::default();
    let foods = sample_foods();

    for count in [10_usize, 100, 1000] {
        let servings = sample_servings(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("batch", count), &servings, |b, servings| {
            b.iter(|| {
                servings
                    .iter()
                    .zip(foods.iter().cycle())
                    .map(|(serving, food)| u64::from(attributor.attribute(serving, food).calories))
                    .sum::<u64>()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_attribution);
criterion_main!(benches);
