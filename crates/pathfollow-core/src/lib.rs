//! Path-following animation engine.
//!
//! Given any closed path and a progress value in `[0, 1]`, this crate computes
//! where a marker sits on the path and which way it points, the trailing
//! stroke segment behind it (wrapping across the path's seam), and the rigid
//! transform that carries a glyph along with it.

pub mod animatable;
pub mod error;
pub mod follower;
pub mod offset;
pub mod sampler;
pub mod shape;
pub mod trail;

pub use animatable::{Animatable, AnimatablePair, Interpolatable};
pub use error::GeometryError;
pub use follower::{FollowPath, FollowerTransform, OnPath};
pub use offset::Offset;
pub use sampler::{point, point_and_angle, PathSampler, Sample};
pub use shape::{ArrowHead, Eight, Pathable};
pub use trail::{stroke_outline, trail, Trail, TrailSegment, TrailStyle, TrimRange};

/// Width of every stroked band (trail, arrowhead).
pub const STROKE_WIDTH: f64 = 3.0;

/// Fraction of the path covered by the trail behind the marker.
pub const TRAIL_LENGTH: f64 = 0.2;
