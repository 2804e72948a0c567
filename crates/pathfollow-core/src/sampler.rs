//! Position and heading along a path at a trim fraction.
//!
//! A trim fraction `t` names the point reached after travelling `t` of the
//! path's total arc length from its start, which is where a path trimmed to
//! `[0, t]` ends. [`PathSampler`] measures the path once and then answers
//! point, heading and trim queries against that measurement.

use kurbo::{
    BezPath, ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathEl, PathSeg, Point, Vec2,
};

/// Accuracy, in path units, of arc length measurement and inversion.
pub const ARCLEN_ACCURACY: f64 = 1e-4;

/// Forward step (in trim-fraction space) used to estimate the heading.
pub const ANGLE_DELTA: f64 = 0.01;

/// Two points closer than this are treated as the same point when stitching
/// trimmed segments back together.
const JOIN_EPSILON: f64 = 1e-9;

/// Distances this close to a segment end snap onto it, so that segment
/// boundaries (and the seam) are hit exactly despite summation error.
const SNAP_DISTANCE: f64 = 1e-9;

/// Where a marker sits and which way it travels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub point: Point,
    /// Direction of travel in radians, `0` pointing along +x.
    pub angle: f64,
}

#[derive(Clone, Debug)]
struct MeasuredSegment {
    seg: PathSeg,
    /// Arc length from the path start to this segment's start.
    start_distance: f64,
    length: f64,
}

impl MeasuredSegment {
    fn end_distance(&self) -> f64 {
        self.start_distance + self.length
    }

    /// Curve parameter reached after `local` units of arc length.
    fn param_at(&self, local: f64) -> f64 {
        if self.length <= 0.0 || local <= SNAP_DISTANCE {
            0.0
        } else if local >= self.length - SNAP_DISTANCE {
            1.0
        } else {
            self.seg.inv_arclen(local, ARCLEN_ACCURACY).clamp(0.0, 1.0)
        }
    }
}

/// Arc-length measurement of a path, reusable for any number of queries.
#[derive(Clone, Debug)]
pub struct PathSampler {
    start: Point,
    segments: Vec<MeasuredSegment>,
    total_length: f64,
}

impl PathSampler {
    pub fn new(path: &BezPath) -> Self {
        let start = path
            .elements()
            .iter()
            .find_map(|el| match el {
                PathEl::MoveTo(p) => Some(*p),
                _ => None,
            })
            .unwrap_or(Point::ZERO);

        let mut segments = Vec::new();
        let mut total_length = 0.0;
        for seg in path.segments() {
            let length = seg.arclen(ARCLEN_ACCURACY);
            segments.push(MeasuredSegment {
                seg,
                start_distance: total_length,
                length,
            });
            total_length += length;
        }

        Self {
            start,
            segments,
            total_length,
        }
    }

    /// Total arc length of the measured path.
    pub fn length(&self) -> f64 {
        self.total_length
    }

    /// The path's literal starting coordinate.
    pub fn start_point(&self) -> Point {
        self.start
    }

    /// Coordinate at trim fraction `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t` is outside `[0, 1]`.
    pub fn point(&self, t: f64) -> Point {
        assert_trim_fraction(t);
        // Trimming to [0, 0] has no endpoint, so the start is answered directly.
        if t == 0.0 {
            return self.start;
        }
        match self.locate(t) {
            Some((index, param)) => self.segments[index].seg.eval(param),
            None => self.start,
        }
    }

    /// Coordinate at `t` together with the direction of travel there.
    ///
    /// The heading points from `point(t)` to `point((t + 0.01) mod 1)`. Near
    /// the end of a closed path the forward sample wraps to its start.
    ///
    /// # Panics
    ///
    /// Panics if `t` is outside `[0, 1]`.
    pub fn point_and_angle(&self, t: f64) -> Sample {
        let point = self.point(t);
        let ahead = self.point((t + ANGLE_DELTA) % 1.0);
        Sample {
            point,
            angle: (ahead.y - point.y).atan2(ahead.x - point.x),
        }
    }

    /// Heading at `t` from the closed-form derivative of the segment under it.
    ///
    /// Falls back to the finite-difference heading where the derivative
    /// vanishes (a control point sitting on its endpoint).
    ///
    /// # Panics
    ///
    /// Panics if `t` is outside `[0, 1]`.
    pub fn analytic_angle(&self, t: f64) -> f64 {
        assert_trim_fraction(t);
        let derivative = self
            .locate(t)
            .map(|(index, param)| derivative(&self.segments[index].seg, param))
            .filter(|d| d.hypot2() > JOIN_EPSILON * JOIN_EPSILON);
        match derivative {
            Some(d) => d.y.atan2(d.x),
            None => self.point_and_angle(t).angle,
        }
    }

    /// Portion of the path between trim fractions `from` and `to`.
    ///
    /// Both ends are clamped to `[0, 1]`. An empty or inverted range yields an
    /// empty path.
    pub fn trim(&self, from: f64, to: f64) -> BezPath {
        let from = from.clamp(0.0, 1.0);
        let to = to.clamp(0.0, 1.0);
        let mut out = BezPath::new();
        if to <= from || self.total_length <= 0.0 {
            return out;
        }

        let d0 = from * self.total_length;
        let d1 = to * self.total_length;
        let mut pen: Option<Point> = None;

        for m in &self.segments {
            if m.length <= 0.0 || m.end_distance() <= d0 || m.start_distance >= d1 {
                continue;
            }
            let p0 = m.param_at(d0 - m.start_distance);
            let p1 = m.param_at(d1 - m.start_distance);
            if p1 <= p0 {
                continue;
            }
            let piece = if p0 == 0.0 && p1 == 1.0 {
                m.seg
            } else {
                m.seg.subsegment(p0..p1)
            };

            let begin = piece.start();
            if pen.map_or(true, |p| p.distance(begin) > JOIN_EPSILON) {
                out.move_to(begin);
            }
            out.push(piece.as_path_el());
            pen = Some(piece.end());
        }

        out
    }

    /// Segment index and curve parameter at trim fraction `t`.
    fn locate(&self, t: f64) -> Option<(usize, f64)> {
        if self.total_length <= 0.0 {
            return None;
        }
        let distance = t * self.total_length;
        let last = self.segments.iter().rposition(|m| m.length > 0.0)?;
        let index = self.segments[..last]
            .iter()
            .position(|m| m.length > 0.0 && distance <= m.end_distance())
            .unwrap_or(last);
        let m = &self.segments[index];
        Some((index, m.param_at(distance - m.start_distance)))
    }
}

fn assert_trim_fraction(t: f64) {
    assert!(
        (0.0..=1.0).contains(&t),
        "trim fraction {t} is outside [0, 1]"
    );
}

fn derivative(seg: &PathSeg, t: f64) -> Vec2 {
    match seg {
        PathSeg::Line(line) => line.p1 - line.p0,
        PathSeg::Quad(quad) => quad.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(cubic) => cubic.deriv().eval(t).to_vec2(),
    }
}

/// Coordinate at trim fraction `t` along `path`.
///
/// # Panics
///
/// Panics if `t` is outside `[0, 1]`.
pub fn point(path: &BezPath, t: f64) -> Point {
    PathSampler::new(path).point(t)
}

/// Coordinate and heading at trim fraction `t` along `path`.
///
/// # Panics
///
/// Panics if `t` is outside `[0, 1]`.
pub fn point_and_angle(path: &BezPath, t: f64) -> Sample {
    PathSampler::new(path).point_and_angle(t)
}
