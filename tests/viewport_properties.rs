//! Clamp, window and minimum-span invariants of the viewport engine.

mod common;

use rand::Rng;

use fitchart::range::Readable;
use fitchart::series::PointSeries;
use fitchart::viewport::{GestureTracker, ViewportEngine, ViewportFrame};

const WIDTH: f64 = 640.0;

fn engine(series: &PointSeries) -> ViewportEngine<'_> {
    ViewportEngine::new(series.x_bounds(), series.y_bounds(), series).expect("finite domain")
}

fn check_frame(engine: &ViewportEngine<'_>, frame: &ViewportFrame, len: usize) {
    let domain = engine.x_domain();
    assert!(frame.zoom >= 1.0 && frame.zoom <= engine.max_zoom(), "{frame:?}");
    assert!(frame.visible_x_range.is_within(&domain), "{frame:?}");

    let y_floor = engine.y_domain().width() / 100.0;
    assert!(frame.visible_y_range.width() >= y_floor * (1.0 - 1e-9), "{frame:?}");

    let w = frame.visible_index_range;
    assert!(w.start <= w.end && w.end <= len, "{w:?}");
    assert_eq!(frame.x_labels.len(), engine.x_axis().count());
    assert_eq!(frame.y_labels.len(), engine.y_axis().count());

    if frame.zoom == 1.0 {
        assert_eq!(frame.visible_x_range, domain);
        assert_eq!(frame.pan, domain.midpoint());
        assert_eq!(frame.x_labels, engine.x_axis().labels());
        assert_eq!(frame.y_labels, engine.y_axis().labels());
    }
}

#[test]
fn random_gestures_keep_the_window_inside_the_domain() {
    let mut rng = common::rng(31);
    for case in 0..100 {
        let n = rng.random_range(2..400);
        let series = common::random_series(&mut rng, n);
        let mut engine = engine(&series);
        for _ in 0..20 {
            let frame = if rng.random::<f64>() < 0.5 {
                engine.on_zoom_settle(rng.random_range(0.2..6.0))
            } else {
                engine.on_pan_settle(rng.random_range(-2.0 * WIDTH..2.0 * WIDTH), WIDTH)
            };
            check_frame(&engine, &frame, series.len());
            assert_eq!(frame, engine.frame(), "case {case}: frame is a pure function of state");
        }
    }
}

#[test]
fn index_window_matches_visible_range() {
    let mut rng = common::rng(37);
    for _ in 0..200 {
        let series = common::random_series(&mut rng, 300);
        let mut engine = engine(&series);
        engine.on_zoom_settle(rng.random_range(1.5..50.0));
        let frame = engine.on_pan_settle(rng.random_range(-WIDTH..WIDTH), WIDTH);

        let points = series.points();
        let visible = frame.visible_x_range;
        let w = frame.visible_index_range;
        assert!(points[w.range()].iter().all(|p| visible.contains(p.x)));
        if w.start > 0 {
            assert!(points[w.start - 1].x < visible.lower);
        }
        if w.end < points.len() {
            assert!(points[w.end].x > visible.upper);
        }
    }
}

#[test]
fn flat_series_keeps_a_minimum_y_span() {
    let xs: Vec<f64> = (0..100).map(f64::from).collect();
    let mut ys = vec![10.0; 100];
    ys[0] = 0.0;
    ys[99] = 20.0;
    let series = PointSeries::from_xy(&xs, &ys);
    let mut engine = engine(&series);
    let frame = engine.on_zoom_settle(10.0);
    assert!((frame.visible_y_range.midpoint() - 10.0).abs() < 1e-12);
    assert!((frame.visible_y_range.width() - 0.2).abs() < 1e-12);
}

#[test]
fn zooming_back_out_resets_pan() {
    let mut rng = common::rng(41);
    let series = common::random_series(&mut rng, 100);
    let mut engine = engine(&series);
    engine.on_zoom_settle(8.0);
    engine.on_pan_settle(-300.0, WIDTH);
    let frame = engine.on_zoom_settle(1.0 / 8.0);
    check_frame(&engine, &frame, series.len());
    assert_eq!(frame.zoom, 1.0);
}

#[test]
fn zoom_is_capped_by_the_limit() {
    let mut rng = common::rng(43);
    let series = common::random_series(&mut rng, 50);
    let mut engine = engine(&series).with_limits(20.0, 0.01);
    let frame = engine.on_zoom_settle(1e6);
    assert_eq!(frame.zoom, 20.0);
}

#[test]
fn tracker_commits_exactly_once() {
    let mut rng = common::rng(47);
    let series = common::random_series(&mut rng, 120);
    let mut engine = engine(&series);
    let mut tracker = GestureTracker::new();

    for factor in [1.2, 1.8, 2.4, 3.0] {
        tracker.zoom_changed(factor);
    }
    assert_eq!(engine.state().zoom(), 1.0);
    let frame = tracker.settle(&mut engine, WIDTH);
    assert_eq!(frame.map(|f| f.zoom), Some(3.0));
    assert!(tracker.settle(&mut engine, WIDTH).is_none());
    assert_eq!(engine.state().zoom(), 3.0);
}
