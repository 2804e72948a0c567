//! Shapes that know how to draw themselves into a rectangle.

use crate::animatable::Animatable;
use crate::trail::stroke_outline;
use crate::STROKE_WIDTH;
use kurbo::{Affine, BezPath, Point, Rect};

/// Anything that can produce a path for a given bounding rectangle.
pub trait Pathable {
    fn to_path(&self, bounds: Rect) -> BezPath;
}

impl<T: Pathable + ?Sized> Pathable for &T {
    fn to_path(&self, bounds: Rect) -> BezPath {
        (**self).to_path(bounds)
    }
}

/// A figure-eight spanning its bounding rectangle.
///
/// The path starts and ends at three quarters across the top edge, so it is
/// geometrically closed without a closing segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Eight;

impl Eight {
    /// The curve in unit coordinates.
    pub fn unit_path() -> BezPath {
        let start = Point::new(0.75, 0.0);
        let mut p = BezPath::new();
        p.move_to(start);
        p.quad_to((1.0, 0.0), (1.0, 0.5));
        p.quad_to((1.0, 1.0), (0.75, 1.0));
        p.curve_to((0.5, 1.0), (0.5, 0.0), (0.25, 0.0));
        p.quad_to((0.0, 0.0), (0.0, 0.5));
        p.quad_to((0.0, 1.0), (0.25, 1.0));
        p.curve_to(Point::new(0.5, 1.0), Point::new(0.5, 0.0), start);
        p
    }
}

impl Pathable for Eight {
    fn to_path(&self, bounds: Rect) -> BezPath {
        let mut path = Self::unit_path();
        path.apply_affine(
            Affine::translate(bounds.origin().to_vec2())
                * Affine::scale_non_uniform(bounds.width(), bounds.height()),
        );
        path
    }
}

impl Animatable for Eight {
    type Data = ();

    fn animatable_data(&self) -> Self::Data {}

    fn set_animatable_data(&mut self, _data: Self::Data) {}
}

/// An open chevron drawn apex-up, stroked into a filled outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
    /// Share of the rectangle's width covered by the base, in `[0, 1]`.
    pub spread: f64,
}

impl Default for ArrowHead {
    fn default() -> Self {
        Self { spread: 1.0 }
    }
}

impl ArrowHead {
    pub fn new(spread: f64) -> Self {
        Self {
            spread: spread.clamp(0.0, 1.0),
        }
    }

    /// The unstroked chevron: left base corner, apex, right base corner.
    pub fn outline(&self, bounds: Rect) -> BezPath {
        let inset = bounds.width() * (1.0 - self.spread.clamp(0.0, 1.0)) / 2.0;
        let mid_x = bounds.center().x;
        let mut p = BezPath::new();
        p.move_to((bounds.min_x() + inset, bounds.max_y()));
        p.line_to((mid_x, bounds.min_y()));
        p.line_to((bounds.max_x() - inset, bounds.max_y()));
        p
    }
}

impl Pathable for ArrowHead {
    fn to_path(&self, bounds: Rect) -> BezPath {
        stroke_outline(&self.outline(bounds), STROKE_WIDTH)
    }
}

impl Animatable for ArrowHead {
    type Data = f64;

    fn animatable_data(&self) -> Self::Data {
        self.spread
    }

    fn set_animatable_data(&mut self, data: Self::Data) {
        self.spread = data.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape as _};

    #[test]
    fn test_eight_is_closed() {
        let path = Eight.to_path(Rect::new(0.0, 0.0, 30.0, 30.0));
        let els = path.elements();
        let first = match els.first() {
            Some(PathEl::MoveTo(p)) => *p,
            other => panic!("path should start with a move, got {other:?}"),
        };
        let last = match els.last() {
            Some(PathEl::CurveTo(_, _, p)) => *p,
            other => panic!("path should end with a cubic, got {other:?}"),
        };
        assert_eq!(first, Point::new(22.5, 0.0));
        assert_eq!(first, last);
    }

    #[test]
    fn test_eight_closing_cubic_crosses_center() {
        let els = Eight::unit_path().elements().to_vec();
        assert_eq!(els.len(), 7);
        assert_eq!(
            els[6],
            PathEl::CurveTo(
                Point::new(0.5, 1.0),
                Point::new(0.5, 0.0),
                Point::new(0.75, 0.0)
            )
        );
    }

    #[test]
    fn test_eight_fills_bounds() {
        let bounds = Rect::new(10.0, 20.0, 70.0, 50.0);
        let bbox = Eight.to_path(bounds).bounding_box();
        assert!((bbox.x0 - 10.0).abs() < 1e-9);
        assert!((bbox.x1 - 70.0).abs() < 1e-9);
        assert!((bbox.y0 - 20.0).abs() < 1e-9);
        assert!((bbox.y1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrowhead_outline_points_up() {
        let outline = ArrowHead::default().outline(Rect::new(0.0, 0.0, 30.0, 30.0));
        assert_eq!(
            outline.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 30.0)),
                PathEl::LineTo(Point::new(15.0, 0.0)),
                PathEl::LineTo(Point::new(30.0, 30.0)),
            ]
        );
    }

    #[test]
    fn test_arrowhead_spread_narrows_base() {
        let outline = ArrowHead::new(0.5).outline(Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(outline.elements()[0], PathEl::MoveTo(Point::new(10.0, 40.0)));
        assert_eq!(outline.elements()[2], PathEl::LineTo(Point::new(30.0, 40.0)));
    }

    #[test]
    fn test_arrowhead_is_stroked() {
        let bounds = Rect::new(0.0, 0.0, 30.0, 30.0);
        let bbox = ArrowHead::default().to_path(bounds).bounding_box();
        // The band reaches past the centerline on every side.
        assert!(bbox.x0 < 0.0 && bbox.x1 > 30.0 && bbox.y0 < 0.0);
    }
}
