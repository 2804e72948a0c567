//! Carrying a glyph along a path.
//!
//! A glyph is authored pointing up. To ride the path it is first moved so its
//! bounding-box center sits on the origin, then rotated by the heading plus a
//! quarter turn (a heading of zero points along +x), then translated onto the
//! sampled point.

use crate::animatable::{Animatable, AnimatablePair};
use crate::sampler::{PathSampler, Sample};
use crate::shape::Pathable;
use crate::trail::{TrailSegment, TrailStyle};
use glam::{DAffine2, DVec2};
use kurbo::{Affine, BezPath, Point, Rect, Shape as _, Size};
use std::f64::consts::FRAC_PI_2;

/// Rigid transform placing an up-pointing glyph on a path sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowerTransform {
    pub position: Point,
    /// Heading in radians, before the quarter-turn correction.
    pub angle: f64,
}

impl FollowerTransform {
    pub fn from_sample(sample: Sample) -> Self {
        Self {
            position: sample.point,
            angle: sample.angle,
        }
    }

    /// # Panics
    ///
    /// Panics if `offset` is outside `[0, 1]`.
    pub fn at(sampler: &PathSampler, offset: f64) -> Self {
        Self::from_sample(sampler.point_and_angle(offset))
    }

    /// `translate(position) * rotate(angle + pi/2)`.
    pub fn matrix(&self) -> DAffine2 {
        DAffine2::from_translation(DVec2::new(self.position.x, self.position.y))
            * DAffine2::from_angle(self.angle + FRAC_PI_2)
    }

    pub fn affine(&self) -> Affine {
        to_kurbo(self.matrix())
    }

    /// Moves `glyph` so it is centered on the sample and faces along the path.
    pub fn carry(&self, glyph: &BezPath) -> BezPath {
        let center = glyph.bounding_box().center();
        let recenter = DAffine2::from_translation(DVec2::new(-center.x, -center.y));
        let mut out = glyph.clone();
        out.apply_affine(to_kurbo(self.matrix() * recenter));
        out
    }
}

fn to_kurbo(m: DAffine2) -> Affine {
    Affine::new(m.to_cols_array())
}

/// A glyph moved along a path, like a view offset onto the path each frame.
///
/// The glyph is drawn into a `glyph_size` box, then carried so that its own
/// bounding-box center lands on the sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowPath<P, G> {
    pub path_shape: P,
    pub glyph: G,
    pub glyph_size: Size,
    /// Progress in `[0, 1]`.
    pub offset: f64,
}

impl<P: Pathable, G> FollowPath<P, G> {
    pub fn new(path_shape: P, glyph: G, glyph_size: Size, offset: f64) -> Self {
        Self {
            path_shape,
            glyph,
            glyph_size,
            offset,
        }
    }

    /// Transform for the current offset with the path laid out in `bounds`.
    pub fn effect_transform(&self, bounds: Rect) -> FollowerTransform {
        let sampler = PathSampler::new(&self.path_shape.to_path(bounds));
        FollowerTransform::at(&sampler, self.offset)
    }
}

impl<P: Pathable, G: Pathable> Pathable for FollowPath<P, G> {
    fn to_path(&self, bounds: Rect) -> BezPath {
        let half = self.glyph_size.to_vec2() / 2.0;
        let glyph_box = Rect::from_origin_size(Point::ZERO - half, self.glyph_size);
        self.effect_transform(bounds)
            .carry(&self.glyph.to_path(glyph_box))
    }
}

impl<P, G: Animatable> Animatable for FollowPath<P, G> {
    type Data = AnimatablePair<f64, G::Data>;

    fn animatable_data(&self) -> Self::Data {
        AnimatablePair::new(self.offset, self.glyph.animatable_data())
    }

    fn set_animatable_data(&mut self, data: Self::Data) {
        self.offset = data.first;
        self.glyph.set_animatable_data(data.second);
    }
}

/// A shape riding a path together with its trail.
///
/// The shape is drawn in the full target rectangle, re-centered about its own
/// bounding box, carried to the offset, and merged with the stroked trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OnPath<P, S> {
    pub shape: S,
    pub path_shape: P,
    /// Progress in `[0, 1]`.
    pub offset: f64,
    pub trail: TrailStyle,
}

impl<P, S> OnPath<P, S> {
    pub fn new(shape: S, path_shape: P, offset: f64) -> Self {
        Self {
            shape,
            path_shape,
            offset,
            trail: TrailStyle::default(),
        }
    }

    pub fn with_trail(mut self, trail: TrailStyle) -> Self {
        self.trail = trail;
        self
    }
}

impl<P: Pathable, S: Pathable> Pathable for OnPath<P, S> {
    fn to_path(&self, bounds: Rect) -> BezPath {
        let sampler = PathSampler::new(&self.path_shape.to_path(bounds));
        let head = FollowerTransform::at(&sampler, self.offset).carry(&self.shape.to_path(bounds));

        let mut result = TrailSegment::extract(&sampler, self.offset, self.trail.length)
            .stroked(self.trail.width);
        result.extend(head);
        result
    }
}

impl<P, S: Animatable> Animatable for OnPath<P, S> {
    type Data = AnimatablePair<f64, S::Data>;

    fn animatable_data(&self) -> Self::Data {
        AnimatablePair::new(self.offset, self.shape.animatable_data())
    }

    fn set_animatable_data(&mut self, data: Self::Data) {
        self.offset = data.first;
        self.shape.set_animatable_data(data.second);
    }
}
