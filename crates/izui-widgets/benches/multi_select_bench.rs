//! Benchmarks for the multi-select dropdown.
//!
//! Run with: cargo bench -p izui-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use izui_core::event::{Event, KeyCode};
use izui_core::geometry::Rect;
use izui_render::frame::Frame;
use izui_widgets::StatefulWidget;
use izui_widgets::multi_select::{
    MultiSelect, MultiSelectState, SelectOption, filter_options, selected_options,
};
use std::hint::black_box;

fn clinic_options(n: usize) -> Vec<SelectOption> {
    (0..n)
        .map(|i| SelectOption::new(format!("clinic-{i}"), format!("Clinic {i} Medical Center")))
        .collect()
}

fn every_third(options: &[SelectOption]) -> Vec<String> {
    options.iter().step_by(3).map(|o| o.value.clone()).collect()
}

// ============================================================================
// Selection engine
// ============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_select/filter");

    for n in [100, 1_000, 10_000] {
        let options = clinic_options(n);
        group.bench_with_input(BenchmarkId::new("search", n), &options, |b, options| {
            b.iter(|| black_box(filter_options(options, black_box("center 4"), true)))
        });
        let selected = every_third(&options);
        group.bench_with_input(BenchmarkId::new("selected_options", n), &options, |b, options| {
            b.iter(|| black_box(selected_options(options, &selected)))
        });
    }

    group.finish();
}

// ============================================================================
// Rendering
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_select/render");

    for n in [10, 1_000] {
        let options = clinic_options(n);
        let selected = every_third(&options);
        let area = Rect::new(2, 1, 50, 3);

        let mut closed = MultiSelectState::default();
        let mut frame = Frame::new(80, 24);
        group.bench_with_input(BenchmarkId::new("closed", n), &(), |b, _| {
            b.iter(|| {
                frame.clear();
                MultiSelect::new(&options, &selected, |_| {}).render(area, &mut frame, &mut closed);
                black_box(&frame.buffer);
            })
        });

        let mut open = MultiSelectState::default();
        open.focus();
        let mut frame = Frame::new(80, 24);
        let mut dropdown = MultiSelect::new(&options, &selected, |_| {}).searchable(true);
        dropdown.render(area, &mut frame, &mut open);
        dropdown.handle_event(&mut open, &Event::key(KeyCode::Enter));
        dropdown.handle_event(&mut open, &Event::key(KeyCode::End));
        group.bench_with_input(BenchmarkId::new("open_composed", n), &(), |b, _| {
            b.iter(|| {
                frame.clear();
                dropdown.render(area, &mut frame, &mut open);
                frame.compose();
                black_box(&frame.buffer);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_render);
criterion_main!(benches);
