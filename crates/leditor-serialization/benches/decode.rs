// Leditor - Lingo level data toolkit
//
// Copyright (c) 2025 Leditor contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decoder benchmarks.
//!
//! Measures geometry decoding serially and on the worker pool, catalog
//! imports and placement lines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use leditor_serialization::geometry::decode_geometry_with;
use leditor_serialization::props::{decode_prop_catalog, decode_prop_placements, PropIndex};
use leditor_serialization::tiles::decode_tile_catalog_with;
use leditor_serialization::DecodeOptions;
use leditor_test::fixtures::{catalogs, geometry, placements};

// ============================================================================
// Geometry
// ============================================================================

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let serial = DecodeOptions::builder().parallel_threshold(usize::MAX).build();
    let parallel = DecodeOptions::builder().parallel_threshold(1).build();

    for (width, height) in [(48, 35), (100, 70), (200, 140)] {
        let text = geometry::patterned_geometry(width, height);
        let label = format!("{}x{}", width, height);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("serial", &label), &text, |b, text| {
            b.iter(|| decode_geometry_with(black_box(text), &serial))
        });
        group.bench_with_input(BenchmarkId::new("parallel", &label), &text, |b, text| {
            b.iter(|| decode_geometry_with(black_box(text), &parallel))
        });
    }

    group.finish();
}

// ============================================================================
// Catalogs
// ============================================================================

fn bench_tile_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_catalog");
    let options = DecodeOptions::strict();

    for count in [100, 1_000, 10_000] {
        let text = catalogs::generated_tiles(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &text, |b, text| {
            b.iter(|| decode_tile_catalog_with(black_box(text), &options))
        });
    }

    group.finish();
}

// ============================================================================
// Placements
// ============================================================================

fn bench_placements(c: &mut Criterion) {
    let mut group = c.benchmark_group("placements");
    let index = match decode_prop_catalog(catalogs::PROPS) {
        Ok(catalog) => PropIndex::from_catalog(&catalog),
        Err(e) => panic!("fixture catalog failed to decode: {}", e),
    };

    for count in [10, 200, 2_000] {
        let line = placements::props_line(&placements::mixed_placements(count));
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &line, |b, line| {
            b.iter(|| decode_prop_placements(black_box(line), &index))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_geometry, bench_tile_catalog, bench_placements);
criterion_main!(benches);
