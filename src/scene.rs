//! One frame of the demo: the static curve, the trail behind the arrowhead and
//! the arrowhead itself, laid out on the canvas.

use crate::animation::{AnimationDriver, Transition};
use crate::config::{Composition, DemoConfig};
use kurbo::{BezPath, Point, Rect, Size};
use pathfollow_core::{
    stroke_outline, Animatable, AnimatablePair, ArrowHead, Eight, FollowPath, Offset, OnPath,
    PathSampler, Pathable, Trail, TrailSegment, TrailStyle, TrimRange,
};
use serde::Serialize;

/// Largest rectangle with the given aspect ratio that fits inside `canvas`
/// after insetting it by `padding`, centered.
pub fn fit_content(canvas: Size, padding: f64, aspect_ratio: f64) -> Rect {
    let available = Rect::from_origin_size((0.0, 0.0), canvas).inset(-padding);
    let (w, h) = (available.width().max(0.0), available.height().max(0.0));
    let size = if w / h > aspect_ratio {
        Size::new(h * aspect_ratio, h)
    } else {
        Size::new(w, w / aspect_ratio)
    };
    Rect::from_center_size(available.center(), size)
}

/// Draws a glyph into a fixed-size box centered in whatever bounds it is given.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Boxed<G> {
    glyph: G,
    size: Size,
}

impl<G: Pathable> Pathable for Boxed<G> {
    fn to_path(&self, bounds: Rect) -> BezPath {
        self.glyph
            .to_path(Rect::from_center_size(bounds.center(), self.size))
    }
}

impl<G: Animatable> Animatable for Boxed<G> {
    type Data = G::Data;

    fn animatable_data(&self) -> Self::Data {
        self.glyph.animatable_data()
    }

    fn set_animatable_data(&mut self, data: Self::Data) {
        self.glyph.set_animatable_data(data);
    }
}

/// Filled outlines for a single frame, in canvas coordinates.
#[derive(Clone, Debug)]
pub struct Frame {
    pub offset: Offset,
    pub spread: f64,
    pub outline: BezPath,
    pub trail: BezPath,
    /// The arrowhead. With [`Composition::OnPath`] this also carries the trail.
    pub glyph: BezPath,
}

#[derive(Debug)]
pub struct Scene {
    config: DemoConfig,
    content: Rect,
    outline: BezPath,
    trail_style: TrailStyle,
    driver: AnimationDriver,
    spread: Transition<f64>,
}

impl Scene {
    /// Lays out the scene and starts its animation at time zero.
    pub fn new(config: DemoConfig) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;
        let trail_style = config.trail_style()?;
        let canvas = Size::new(config.width as f64, config.height as f64);
        let content = fit_content(canvas, config.padding, config.aspect_ratio);
        let outline = stroke_outline(&Eight.to_path(content), config.outline_width);

        let mut driver = AnimationDriver::new(config.duration_secs);
        driver.appear(0.0);
        let spread = Transition::new(
            config.spread.from,
            config.spread.to,
            config.spread.duration_secs,
        );

        tracing::info!(
            width = config.width,
            height = config.height,
            composition = ?config.composition,
            "Scene laid out in {:?}",
            content
        );

        Ok(Self {
            config,
            content,
            outline,
            trail_style,
            driver,
            spread,
        })
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Rectangle the curve is drawn into.
    pub fn content(&self) -> Rect {
        self.content
    }

    /// Time of frame `index` at the configured frame rate.
    pub fn frame_time(&self, index: u32) -> f64 {
        index as f64 / self.config.fps as f64
    }

    /// Advances the animation to `time` seconds and builds that frame.
    pub fn frame_at(&mut self, time: f64) -> Frame {
        let offset = self.driver.tick(time);
        self.spread.update(time);
        let spread = self.spread.current_value;
        tracing::debug!(time, offset = offset.get(), spread, "Building frame");

        let state = AnimatablePair::new(offset.get(), spread);
        let glyph_size = Size::new(self.config.glyph_size, self.config.glyph_size);

        let (trail, glyph) = match self.config.composition {
            Composition::Layered => {
                let mut follower =
                    FollowPath::new(Eight, ArrowHead::default(), glyph_size, 0.0);
                follower.set_animatable_data(state);
                let mut trail = Trail::new(Eight, 0.0).with_style(self.trail_style);
                trail.set_animatable_data(state.first);
                (trail.to_path(self.content), follower.to_path(self.content))
            }
            Composition::OnPath => {
                let head = Boxed {
                    glyph: ArrowHead::default(),
                    size: glyph_size,
                };
                let mut on_path = OnPath::new(head, Eight, 0.0).with_trail(self.trail_style);
                on_path.set_animatable_data(state);
                (BezPath::new(), on_path.to_path(self.content))
            }
        };

        Frame {
            offset,
            spread,
            outline: self.outline.clone(),
            trail,
            glyph,
        }
    }

    /// Every frame of one loop, in order.
    pub fn frames(&mut self, count: u32) -> Vec<Frame> {
        (0..count).map(|i| self.frame_at(self.frame_time(i))).collect()
    }
}

/// Sampler and trail output for one offset on the figure-eight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleReport {
    pub offset: f64,
    pub path_length: f64,
    pub point: [f64; 2],
    pub angle: f64,
    pub analytic_angle: f64,
    pub trail: Vec<TrimRange>,
}

/// Samples the figure-eight drawn into a `size` rectangle at the origin.
pub fn sample_report(size: Size, offset: Offset, trail_length: f64) -> SampleReport {
    let path = Eight.to_path(Rect::from_origin_size(Point::ZERO, size));
    let sampler = PathSampler::new(&path);
    let t = offset.get();
    let sample = sampler.point_and_angle(t);
    SampleReport {
        offset: t,
        path_length: sampler.length(),
        point: [sample.point.x, sample.point.y],
        angle: sample.angle,
        analytic_angle: sampler.analytic_angle(t),
        trail: TrailSegment::extract(&sampler, t, trail_length)
            .pieces()
            .to_vec(),
    }
}
