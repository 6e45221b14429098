//! Frame rendering benchmarks.
//!
//! Measures one full `on_repaint_requested` pass for growing column counts,
//! both into a recording surface and into a terminal buffer.
//!
//! Run with: cargo bench --bench render_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use calgrid::model::LayoutConstants;
use calgrid::render::RecordingSurface;
use calgrid::view::terminal_surface::TerminalSurface;
use calgrid::CalendarGrid;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

fn grid(columns: u32) -> CalendarGrid {
    let layout = LayoutConstants {
        column_count: columns,
        ..LayoutConstants::default()
    };
    let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
    let mut grid = CalendarGrid::new(start, layout);
    grid.on_resize(1600.0, 1000.0);
    grid.set_horizontal_offset(-37.0);
    grid
}

/// Benchmark recording a frame as the number of visible columns grows.
fn benchmark_recording_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_recording");

    for columns in [1, 5, 14, 31] {
        let mut grid = grid(columns);
        group.bench_with_input(BenchmarkId::new("columns", columns), &columns, |b, _| {
            b.iter(|| {
                let mut surface = RecordingSurface::new();
                black_box(grid.on_repaint_requested(&mut surface));
                black_box(surface.take_commands())
            });
        });
    }

    group.finish();
}

/// Benchmark rasterizing a frame into a 200×62 terminal buffer.
fn benchmark_terminal_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_terminal");
    let area = Rect::new(0, 0, 200, 62);

    for columns in [5, 14] {
        let mut grid = grid(columns);
        group.bench_with_input(BenchmarkId::new("columns", columns), &columns, |b, _| {
            b.iter(|| {
                let mut buffer = Buffer::empty(area);
                let mut surface = TerminalSurface::new(&mut buffer, area);
                black_box(grid.on_repaint_requested(&mut surface));
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets = benchmark_recording_surface, benchmark_terminal_surface
}
criterion_main!(benches);
