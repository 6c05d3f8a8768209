// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the contour editor hot paths: hit testing on
// pointer-down and vertex updates on every pointer-move.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use belegwerk_core::geometry::DisplayPoint;
use belegwerk_core::{Contour, Point};
use belegwerk_editor::ContourEditor;

fn editor() -> ContourEditor {
    let contour = Contour::new([
        Point::new(120.0, 80.0),
        Point::new(1700.0, 95.0),
        Point::new(1680.0, 1010.0),
        Point::new(140.0, 990.0),
    ]);
    ContourEditor::new((1920, 1080), 800.0, Some(contour))
}

fn bench_hit_test(c: &mut Criterion) {
    let editor = editor();
    c.bench_function("hit_test (4 vertices)", |b| {
        b.iter(|| editor.hit_test(black_box(DisplayPoint::new(700.0, 40.0))));
    });
}

fn bench_drag_update(c: &mut Criterion) {
    c.bench_function("drag update (pointer move)", |b| {
        let mut editor = editor();
        editor.begin_drag(2);
        let mut x = 0.0;
        b.iter(|| {
            x += 0.5;
            black_box(editor.update_drag(DisplayPoint::new(600.0 + x % 50.0, 400.0)));
        });
    });
}

criterion_group!(benches, bench_hit_test, bench_drag_update);
criterion_main!(benches);
