use crate::animation::DEFAULT_DURATION;
use anyhow::{Context, Result};
use pathfollow_core::{TrailStyle, STROKE_WIDTH, TRAIL_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas size {width}x{height} must be non-zero")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("padding {padding} leaves no room on a {width}x{height} canvas")]
    PaddingTooLarge { padding: f64, width: u32, height: u32 },

    #[error("aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("duration must be positive, got {0}")]
    InvalidDuration(f64),

    #[error("fps must be at least 1")]
    InvalidFps,

    #[error("glyph size must be positive, got {0}")]
    InvalidGlyphSize(f64),

    #[error(transparent)]
    Geometry(#[from] pathfollow_core::GeometryError),
}

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const GRAY: Rgba = Rgba([128, 128, 128, 255]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn opacity(self) -> f64 {
        self.0[3] as f64 / 255.0
    }
}

/// How the arrowhead and its trail are put together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    /// A fixed-size glyph carried by a follow effect, with a separate trail.
    #[default]
    Layered,
    /// A single shape holding both the trail and the glyph drawn in the frame.
    OnPath,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba,
    pub outline: Rgba,
    pub trail: Rgba,
    pub glyph: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            outline: Rgba::GRAY,
            trail: Rgba::BLACK,
            glyph: Rgba::BLACK,
        }
    }
}

/// Animated spread of the arrowhead, independent of its position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    pub from: f64,
    pub to: f64,
    pub duration_secs: f64,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            from: 1.0,
            to: 1.0,
            duration_secs: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    /// Inset around the curve on every side.
    pub padding: f64,
    /// Width over height of the box the curve is fitted into.
    pub aspect_ratio: f64,
    /// Side length of the arrowhead's square box.
    pub glyph_size: f64,
    pub duration_secs: f64,
    pub fps: u32,
    pub trail_length: f64,
    pub stroke_width: f64,
    /// Width of the static curve outline.
    pub outline_width: f64,
    pub composition: Composition,
    pub spread: SpreadConfig,
    pub palette: Palette,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            padding: 20.0,
            aspect_ratio: 16.0 / 9.0,
            glyph_size: 30.0,
            duration_secs: DEFAULT_DURATION,
            fps: 30,
            trail_length: TRAIL_LENGTH,
            stroke_width: STROKE_WIDTH,
            outline_width: 1.0,
            composition: Composition::default(),
            spread: SpreadConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl DemoConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: DemoConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.padding >= 0.0)
            || 2.0 * self.padding >= self.width.min(self.height) as f64
        {
            return Err(ConfigError::PaddingTooLarge {
                padding: self.padding,
                width: self.width,
                height: self.height,
            });
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.duration_secs > 0.0 && self.duration_secs.is_finite()) {
            return Err(ConfigError::InvalidDuration(self.duration_secs));
        }
        if self.fps == 0 {
            return Err(ConfigError::InvalidFps);
        }
        if !(self.glyph_size > 0.0) {
            return Err(ConfigError::InvalidGlyphSize(self.glyph_size));
        }
        self.trail_style()?;
        if !(self.outline_width > 0.0) {
            return Err(pathfollow_core::GeometryError::InvalidStrokeWidth(self.outline_width).into());
        }
        Ok(())
    }

    pub fn trail_style(&self) -> Result<TrailStyle, ConfigError> {
        Ok(TrailStyle::new(self.trail_length, self.stroke_width)?)
    }

    /// Frames in one loop around the path.
    pub fn frames_per_loop(&self) -> u32 {
        (self.duration_secs * self.fps as f64).round().max(1.0) as u32
    }
}
