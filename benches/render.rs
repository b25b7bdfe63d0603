// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use proteus::config::PlaygroundConfig;
use proteus::eval::Evaluator;
use proteus::render::{render_tree_unicode, RenderOptions};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name: `render.tree`
// - Case IDs as in `benches/parse.rs`.
fn benches_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render.tree");
    let evaluator = Evaluator::new(PlaygroundConfig::builtin().component_registry());
    let options = RenderOptions::with_width(80);

    for case in
        [fixtures::Case::Small, fixtures::Case::MediumSections, fixtures::Case::LargeDeepLists]
    {
        let source = fixtures::source(case);
        let result = evaluator.evaluate(&source);
        let tree = result.tree().expect("fixture renders").clone();
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let text = render_tree_unicode(black_box(&tree), &options);
                black_box(text.len())
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);
