//! Benchmark: path-glob and matcher evaluation over a wide scene.
//!
//! Run with: `cargo bench -p uimonkey-core --bench matcher_bench`
//!
//! Object searches evaluate a matcher against every live node on every poll,
//! so per-node cost dominates finder latency on large scenes.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use uimonkey_core::capability::{Capability, Control};
use uimonkey_core::geometry::Rect;
use uimonkey_core::matcher::{CapabilityMatcher, Matcher, NameMatcher, PathGlob, PathMatcher};
use uimonkey_core::scene::{NodeId, Scene};
use uimonkey_harness::{NodeSpec, TestScene};

/// Three panels of 100 rows each, every row holding one button.
fn wide_scene() -> (TestScene, Vec<NodeId>) {
    let mut scene = TestScene::new();
    let canvas = scene.add_root(NodeSpec::new("Canvas"));
    let mut all = vec![canvas];
    for p in 0..3 {
        let panel = scene.add_child(canvas, NodeSpec::new(format!("Panel{p}")));
        all.push(panel);
        for r in 0..100 {
            let row = scene.add_child(panel, NodeSpec::new(format!("Row{r}")));
            let button = scene.add_child(
                row,
                NodeSpec::new("Button")
                    .rect(Rect::new(0.0, r as f32 * 10.0, 100.0, 10.0))
                    .capability(Capability::selectable(Control::Button)),
            );
            all.push(row);
            all.push(button);
        }
    }
    (scene, all)
}

// ===========================================================================
// Path globs
// ===========================================================================

fn bench_path_glob(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_glob");
    let path = "/Canvas/Panel2/Row99/Button";

    let exact = PathGlob::new("/Canvas/Panel2/Row99/Button");
    group.bench_function("exact", |b| b.iter(|| exact.is_match(black_box(path))));

    let star = PathGlob::new("/Canvas/Panel*/Row9?/Button");
    group.bench_function("segment_wildcards", |b| {
        b.iter(|| star.is_match(black_box(path)))
    });

    let deep = PathGlob::new("/**/Button");
    group.bench_function("any_depth", |b| b.iter(|| deep.is_match(black_box(path))));

    let miss = PathGlob::new("/**/Panel*/**/Missing");
    group.bench_function("any_depth_miss", |b| {
        b.iter(|| miss.is_match(black_box(path)))
    });

    group.finish();
}

// ===========================================================================
// Full-scene scans
// ===========================================================================

fn scan(scene: &dyn Scene, nodes: &[NodeId], matcher: &dyn Matcher) -> usize {
    nodes.iter().filter(|n| matcher.is_match(scene, **n)).count()
}

fn bench_scene_scan(c: &mut Criterion) {
    let (scene, nodes) = wide_scene();
    let mut group = c.benchmark_group("scene_scan");

    let by_name = NameMatcher::new("Row42");
    group.bench_function("name", |b| {
        b.iter(|| scan(&scene, black_box(&nodes), &by_name))
    });

    let by_path = PathMatcher::new("/Canvas/Panel1/Row4*/Button");
    group.bench_function("path", |b| {
        b.iter(|| scan(&scene, black_box(&nodes), &by_path))
    });

    let by_type = CapabilityMatcher::new("Button").with_path("/**/Row1?/*");
    group.bench_function("capability_and_path", |b| {
        b.iter(|| scan(&scene, black_box(&nodes), &by_type))
    });

    group.finish();
}

criterion_group!(benches, bench_path_glob, bench_scene_scan);
criterion_main!(benches);
