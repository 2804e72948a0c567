//! Headless output for scene frames: PNG through tiny-skia, SVG through kurbo.

use crate::config::{DemoConfig, Rgba};
use crate::scene::Frame;
use kurbo::{BezPath, PathEl};
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Converts a kurbo path into a tiny-skia one. Empty paths yield `None`.
pub fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn paint(color: Rgba) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn fill(pixmap: &mut Pixmap, path: &BezPath, color: Rgba) {
    if let Some(path) = to_skia_path(path) {
        pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
}

/// Rasterises one frame: background, curve outline, trail, then the glyph.
pub fn render_frame(frame: &Frame, config: &DemoConfig) -> Result<Pixmap, RenderError> {
    let mut pixmap = Pixmap::new(config.width, config.height).ok_or(RenderError::Allocation {
        width: config.width,
        height: config.height,
    })?;
    let [r, g, b, a] = config.palette.background.0;
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

    fill(&mut pixmap, &frame.outline, config.palette.outline);
    fill(&mut pixmap, &frame.trail, config.palette.trail);
    fill(&mut pixmap, &frame.glyph, config.palette.glyph);
    Ok(pixmap)
}

pub fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), RenderError> {
    pixmap.save_png(path).map_err(|e| RenderError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// File name of frame `index` inside an output directory.
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:04}.png")
}

/// A standalone SVG document for one frame.
pub fn frame_to_svg(frame: &Frame, config: &DemoConfig) -> Result<String, fmt::Error> {
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    )?;
    let bg = config.palette.background;
    writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}" fill-opacity="{:.3}"/>"#,
        bg.to_hex(),
        bg.opacity()
    )?;
    for (path, color) in [
        (&frame.outline, config.palette.outline),
        (&frame.trail, config.palette.trail),
        (&frame.glyph, config.palette.glyph),
    ] {
        if path.elements().is_empty() {
            continue;
        }
        writeln!(
            svg,
            r#"  <path d="{}" fill="{}" fill-opacity="{:.3}"/>"#,
            path.to_svg(),
            color.to_hex(),
            color.opacity()
        )?;
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}
