//! The stroke segment trailing behind a marker.

use crate::animatable::Animatable;
use crate::error::GeometryError;
use crate::sampler::PathSampler;
use crate::shape::Pathable;
use crate::{STROKE_WIDTH, TRAIL_LENGTH};
use kurbo::{BezPath, Cap, Join, PathEl, Point, Rect, Stroke, StrokeOpts};
use serde::{Deserialize, Serialize};

const STROKE_TOLERANCE: f64 = 0.01;
const SEAM_EPSILON: f64 = 1e-9;

/// A closed interval of trim fractions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    pub from: f64,
    pub to: f64,
}

impl TrimRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn span(&self) -> f64 {
        (self.to - self.from).max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.to <= self.from
    }
}

/// Length and width of a trail.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailStyle {
    pub length: f64,
    pub width: f64,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            length: TRAIL_LENGTH,
            width: STROKE_WIDTH,
        }
    }
}

impl TrailStyle {
    pub fn new(length: f64, width: f64) -> Result<Self, GeometryError> {
        if !(length > 0.0 && length < 1.0) {
            return Err(GeometryError::InvalidTrailLength(length));
        }
        if !(width > 0.0 && width.is_finite()) {
            return Err(GeometryError::InvalidStrokeWidth(width));
        }
        Ok(Self { length, width })
    }
}

/// The part of a path covering `[offset - length, offset]`.
///
/// When the range reaches back past the start of the path, it continues from
/// the end: the segment is `[offset - length + 1, 1]` followed by
/// `[0, offset]`.
#[derive(Clone, Debug)]
pub struct TrailSegment {
    pieces: Vec<TrimRange>,
    centerline: BezPath,
}

impl TrailSegment {
    /// Trail ending at `offset`. Lengths of 1 or more are not meaningful.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is outside `[0, 1]`.
    pub fn extract(sampler: &PathSampler, offset: f64, trail_length: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&offset),
            "trail offset {offset} is outside [0, 1]"
        );
        let trim_from = offset - trail_length;

        let mut ranges = Vec::with_capacity(2);
        if trim_from < 0.0 {
            ranges.push(TrimRange::new(trim_from + 1.0, 1.0));
        }
        ranges.push(TrimRange::new(trim_from.max(0.0), offset));

        let mut pieces = Vec::with_capacity(ranges.len());
        let mut centerline = BezPath::new();
        for range in ranges {
            // [0, 0] at offset zero has no geometry
            if range.is_empty() {
                continue;
            }
            append_joined(&mut centerline, &sampler.trim(range.from, range.to));
            pieces.push(range);
        }

        Self { pieces, centerline }
    }

    /// The non-empty trim ranges making up the trail, in drawing order.
    pub fn pieces(&self) -> &[TrimRange] {
        &self.pieces
    }

    /// Total trim-fraction span covered.
    pub fn span(&self) -> f64 {
        self.pieces.iter().map(TrimRange::span).sum()
    }

    pub fn wraps(&self) -> bool {
        self.pieces.len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The trail as a zero-width path.
    pub fn centerline(&self) -> &BezPath {
        &self.centerline
    }

    /// The trail as a filled band of the given width.
    pub fn stroked(&self, width: f64) -> BezPath {
        stroke_outline(&self.centerline, width)
    }
}

/// Appends `src` to `dst`, continuing the current subpath when `src` starts
/// where `dst` ends so that no cap is drawn across the seam.
fn append_joined(dst: &mut BezPath, src: &BezPath) {
    let pen = current_point(dst);
    for (i, el) in src.elements().iter().enumerate() {
        if let (0, PathEl::MoveTo(p), Some(pen)) = (i, el, pen) {
            if p.distance(pen) <= SEAM_EPSILON {
                continue;
            }
        }
        dst.push(*el);
    }
}

fn current_point(path: &BezPath) -> Option<Point> {
    path.elements().last().and_then(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
        PathEl::QuadTo(_, p) => Some(*p),
        PathEl::CurveTo(_, _, p) => Some(*p),
        PathEl::ClosePath => None,
    })
}

/// Converts a path into the filled outline of a fixed-width stroke with butt
/// caps and miter joins.
pub fn stroke_outline(path: &BezPath, width: f64) -> BezPath {
    if path.elements().is_empty() {
        return BezPath::new();
    }
    let style = Stroke::new(width)
        .with_caps(Cap::Butt)
        .with_join(Join::Miter);
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), STROKE_TOLERANCE)
}

/// Stroked trail of `path` ending at `offset`.
///
/// # Panics
///
/// Panics if `offset` is outside `[0, 1]`.
pub fn trail(path: &BezPath, offset: f64, trail_length: f64) -> BezPath {
    TrailSegment::extract(&PathSampler::new(path), offset, trail_length).stroked(STROKE_WIDTH)
}

/// The trail of a shape at an animatable offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trail<P> {
    pub path_shape: P,
    /// Progress in `[0, 1]`.
    pub offset: f64,
    pub style: TrailStyle,
}

impl<P> Trail<P> {
    pub fn new(path_shape: P, offset: f64) -> Self {
        Self {
            path_shape,
            offset,
            style: TrailStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TrailStyle) -> Self {
        self.style = style;
        self
    }
}

impl<P: Pathable> Pathable for Trail<P> {
    fn to_path(&self, bounds: Rect) -> BezPath {
        let sampler = PathSampler::new(&self.path_shape.to_path(bounds));
        TrailSegment::extract(&sampler, self.offset, self.style.length).stroked(self.style.width)
    }
}

impl<P> Animatable for Trail<P> {
    type Data = f64;

    fn animatable_data(&self) -> Self::Data {
        self.offset
    }

    fn set_animatable_data(&mut self, data: Self::Data) {
        self.offset = data;
    }
}
