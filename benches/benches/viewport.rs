// Copyright 2026 the Floormark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use floormark::{InputEvent, MapSession};
use floormark_gesture::orchestrator::GestureOrchestrator;
use floormark_gesture::primitive::{GesturePhase, GesturePrimitive};
use floormark_viewport::{NormalizedPoint, ViewportState, ViewportTransform};
use kurbo::{Point, Size, Vec2};

const CONTAINER: Size = Size::new(390.0, 844.0);

fn turned_viewport() -> ViewportTransform {
    let mut viewport = ViewportTransform::default();
    viewport
        .restore(ViewportState {
            scale: 1.7,
            offset: Vec2::new(-40.0, 85.0),
            rotation_degrees: 33.0,
        })
        .expect("finite state");
    viewport
}

fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("floormark_viewport");
    let viewport = turned_viewport();

    group.bench_function("screen_to_normalized", |b| {
        b.iter(|| {
            viewport
                .screen_to_normalized(black_box(Point::new(120.0, 610.0)), CONTAINER)
                .expect("usable container")
        });
    });
    group.bench_function("normalized_to_view", |b| {
        b.iter(|| {
            viewport.normalized_to_view(black_box(NormalizedPoint::new(0.3, 0.7)), CONTAINER)
        });
    });
    group.bench_function("anchored_zoom(in_out)", |b| {
        let mut viewport = turned_viewport();
        let focal = Point::new(200.0, 300.0);
        b.iter(|| {
            viewport
                .anchored_zoom(black_box(1.05), focal, CONTAINER)
                .expect("valid ratio");
            viewport
                .anchored_zoom(black_box(1.0 / 1.05), focal, CONTAINER)
                .expect("valid ratio");
        });
    });
    group.finish();
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("floormark_gesture");

    group.bench_function("pinch(60_updates)", |b| {
        let focal = Point::new(150.0, 420.0);
        b.iter(|| {
            let mut viewport = ViewportTransform::default();
            let mut gestures = GestureOrchestrator::default();
            gestures.set_container(CONTAINER).expect("usable container");
            gestures.handle(
                &mut viewport,
                &GesturePrimitive::pinch(GesturePhase::Began, 1.0, focal),
            );
            for step in 1..=60 {
                let scale = 1.0 + f64::from(step) / 60.0;
                gestures.handle(
                    &mut viewport,
                    &GesturePrimitive::pinch(GesturePhase::Changed, scale, focal),
                );
            }
            gestures.handle(
                &mut viewport,
                &GesturePrimitive::pinch(GesturePhase::Ended, 2.0, focal),
            );
            black_box(viewport.state())
        });
    });

    group.bench_function("session_pan(60_updates)", |b| {
        let start = Point::new(100.0, 100.0);
        b.iter(|| {
            let mut session = MapSession::default();
            session.handle(InputEvent::ContainerResized(CONTAINER));
            session.subscribe(|n| {
                black_box(n);
            });
            session.handle(InputEvent::Gesture(GesturePrimitive::pan(
                GesturePhase::Began,
                Vec2::ZERO,
                start,
            )));
            for step in 1..=60 {
                let translation = Vec2::new(f64::from(step) * 2.0, f64::from(step));
                session.handle(InputEvent::Gesture(GesturePrimitive::pan(
                    GesturePhase::Changed,
                    translation,
                    start,
                )));
            }
            black_box(session.viewport().offset())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_mapping, bench_gestures);
criterion_main!(benches);
