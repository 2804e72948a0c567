//! End-to-end checks of the path-following engine on the demo figure-eight.
//!
//! Run with: cargo test -p pathfollow-core --test figure_eight

use kurbo::{BezPath, ParamCurveArclen, ParamCurveNearest, PathEl, Point, Rect};
use pathfollow_core::{
    trail, ArrowHead, Eight, FollowerTransform, OnPath, PathSampler, Pathable, TrailSegment,
    TRAIL_LENGTH,
};

fn eight_30() -> BezPath {
    Eight.to_path(Rect::new(0.0, 0.0, 30.0, 30.0))
}

fn distance_to_path(path: &BezPath, p: Point) -> f64 {
    path.segments()
        .map(|seg| seg.nearest(p, 1e-8).distance_sq)
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

fn centerline_length(path: &BezPath) -> f64 {
    path.segments().map(|seg| seg.arclen(1e-7)).sum()
}

#[test]
fn test_start_point_is_exact() {
    let sampler = PathSampler::new(&eight_30());
    assert_eq!(sampler.point(0.0), Point::new(22.5, 0.0));
    assert_eq!(sampler.start_point(), Point::new(22.5, 0.0));
}

#[test]
fn test_samples_lie_on_outline() {
    let path = eight_30();
    let sampler = PathSampler::new(&path);
    for i in 0..=100 {
        let t = i as f64 / 100.0;
        let p = sampler.point(t);
        assert!(
            distance_to_path(&path, p) < 1e-6,
            "point at {t} is off the curve: {p:?}"
        );
    }
}

#[test]
fn test_halfway_is_mirror_of_start() {
    let sampler = PathSampler::new(&eight_30());
    let p = sampler.point(0.5);
    assert!(p.distance(Point::new(7.5, 0.0)) < 1e-3, "got {p:?}");
}

#[test]
fn test_no_seam_discontinuity() {
    let sampler = PathSampler::new(&eight_30());
    let start = sampler.point(0.0);
    let mut previous = f64::INFINITY;
    for eps in [1e-2, 1e-3, 1e-4, 1e-6] {
        let gap = sampler.point(1.0 - eps).distance(start);
        assert!(gap < previous);
        previous = gap;
    }
    assert!(previous < 1e-3);
    assert!(sampler.point(1.0).distance(start) < 1e-9);
}

#[test]
fn test_sampling_is_idempotent() {
    let sampler = PathSampler::new(&eight_30());
    for t in [0.0, 0.13, 0.5, 0.77, 0.995, 1.0] {
        assert_eq!(sampler.point_and_angle(t), sampler.point_and_angle(t));
    }
    let path = eight_30();
    assert_eq!(
        pathfollow_core::point_and_angle(&path, 0.42),
        pathfollow_core::point_and_angle(&path, 0.42)
    );
}

#[test]
fn test_initial_heading() {
    let sampler = PathSampler::new(&eight_30());
    // The first arc leaves the start heading right and bending down.
    let angle = sampler.point_and_angle(0.0).angle;
    assert!(angle > 0.0 && angle < std::f64::consts::FRAC_PI_4, "got {angle}");
    assert!(sampler.analytic_angle(0.0).abs() < 1e-9);
    assert!((angle - sampler.analytic_angle(0.0)).abs() < 0.3);
}

#[test]
fn test_trail_wraps_across_seam() {
    let sampler = PathSampler::new(&eight_30());
    let trail = TrailSegment::extract(&sampler, 0.1, TRAIL_LENGTH);
    let pieces = trail.pieces();
    assert_eq!(pieces.len(), 2);
    assert!((pieces[0].from - 0.9).abs() < 1e-12);
    assert_eq!(pieces[0].to, 1.0);
    assert_eq!(pieces[1].from, 0.0);
    assert_eq!(pieces[1].to, 0.1);

    // The first piece ends at the path start, where the second begins.
    let end_of_first = sampler.trim(pieces[0].from, pieces[0].to);
    let start_of_second = sampler.trim(pieces[1].from, pieces[1].to);
    let first_end = end_of_first.segments().last().map(|s| kurbo::ParamCurve::end(&s));
    let second_start = start_of_second
        .segments()
        .next()
        .map(|s| kurbo::ParamCurve::start(&s));
    let start = sampler.start_point();
    assert!(first_end.is_some_and(|p| p.distance(start) < 1e-9));
    assert!(second_start.is_some_and(|p| p.distance(start) < 1e-9));
}

#[test]
fn test_trail_without_wrap() {
    let sampler = PathSampler::new(&eight_30());
    let trail = TrailSegment::extract(&sampler, 0.5, TRAIL_LENGTH);
    assert_eq!(trail.pieces().len(), 1);
    assert!((trail.pieces()[0].from - 0.3).abs() < 1e-12);
    assert_eq!(trail.pieces()[0].to, 0.5);

    let expected = sampler.trim(trail.pieces()[0].from, 0.5);
    assert_eq!(trail.centerline().elements(), expected.elements());
}

#[test]
fn test_trail_span_is_constant() {
    let sampler = PathSampler::new(&eight_30());
    for i in 0..=40 {
        let offset = i as f64 / 40.0;
        let trail = TrailSegment::extract(&sampler, offset, TRAIL_LENGTH);
        assert!(
            (trail.span() - TRAIL_LENGTH).abs() < 1e-9,
            "span at {offset} was {}",
            trail.span()
        );
        let measured = centerline_length(trail.centerline()) / sampler.length();
        assert!(
            (measured - TRAIL_LENGTH).abs() < 1e-3,
            "measured span at {offset} was {measured}"
        );
    }
}

#[test]
fn test_trail_at_offset_zero() {
    let path = eight_30();
    let stroked = trail(&path, 0.0, TRAIL_LENGTH);
    assert!(!stroked.elements().is_empty());
}

#[test]
fn test_glyph_faces_direction_of_travel() {
    let sampler = PathSampler::new(&eight_30());
    let bounds = Rect::new(0.0, 0.0, 30.0, 30.0);
    let glyph = ArrowHead::default().outline(bounds);
    for t in [0.05, 0.3, 0.6, 0.85] {
        let sample = sampler.point_and_angle(t);
        let carried = FollowerTransform::from_sample(sample).carry(&glyph);
        let apex = match carried.elements()[1] {
            PathEl::LineTo(p) => p,
            other => panic!("unexpected element {other:?}"),
        };
        let heading = (apex.y - sample.point.y).atan2(apex.x - sample.point.x);
        let diff = (heading - sample.angle).rem_euclid(std::f64::consts::TAU);
        assert!(diff < 1e-9 || (std::f64::consts::TAU - diff) < 1e-9);
    }
}

#[test]
fn test_on_path_every_frame() {
    let bounds = Rect::new(0.0, 0.0, 30.0, 30.0);
    let mut on_path = OnPath::new(ArrowHead::default(), Eight, 0.0);
    for frame in 0..150 {
        on_path.offset = frame as f64 / 150.0;
        assert!(!on_path.to_path(bounds).elements().is_empty());
    }
}
