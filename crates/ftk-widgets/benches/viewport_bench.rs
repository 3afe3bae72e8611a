//! Benchmarks for viewport navigation and list drawing.
//!
//! Run with: cargo bench -p ftk-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ftk_core::canvas::Canvas;
use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::Renderer;
use ftk_widgets::{ScrollList, ViewportState, Widget};
use std::hint::black_box;

// ============================================================================
// Viewport navigation
// ============================================================================

fn bench_viewport_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/walk");

    for len in [100usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("down_to_end", len), &len, |b, &len| {
            b.iter(|| {
                let mut v = ViewportState::with_list(24, len);
                while v.down() {}
                black_box(v.current_item())
            })
        });
        group.bench_with_input(BenchmarkId::new("page_down_to_end", len), &len, |b, &len| {
            b.iter(|| {
                let mut v = ViewportState::with_list(24, len);
                while v.page_down() {}
                black_box(v.current_top())
            })
        });
    }

    group.finish();
}

// ============================================================================
// ScrollList drawing
// ============================================================================

fn bench_scroll_list_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/scroll_list");

    for (w, h) in [(40u16, 10u16), (80, 24)] {
        let mut canvas = Canvas::new(w, h);
        let items: Vec<String> = (0..1_000).map(|i| format!("item number {i}")).collect();
        let mut list = match ScrollList::new(canvas.surface(), Rect::from_size(w, h), items) {
            Ok(list) => list.with_box(true).with_scrollbar(true),
            Err(err) => panic!("bench list does not fit: {err}"),
        };

        group.bench_with_input(BenchmarkId::new("draw", format!("{w}x{h}")), &(), |b, _| {
            b.iter(|| {
                list.draw(&mut canvas, true);
                black_box(canvas.draw_calls())
            })
        });

        group.bench_with_input(BenchmarkId::new("inject_down", format!("{w}x{h}")), &(), |b, _| {
            b.iter(|| {
                list.inject(&mut canvas, KeyEvent::new(KeyCode::Down));
                black_box(list.current_item())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_viewport_walk, bench_scroll_list_draw);
criterion_main!(benches);
