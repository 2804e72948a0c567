//! # pathfollow
//!
//! Renders the arrowhead-on-a-figure-eight animation without a window.
//!
//! ## Commands
//! - `render`: Write one loop of PNG frames into a directory
//! - `svg`: Print a single frame as an SVG document
//! - `sample`: Print the sampled point, heading and trail ranges as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kurbo::Size;
use pathfollow::render::{frame_file_name, frame_to_svg, render_frame, write_png};
use pathfollow::scene::sample_report;
use pathfollow::{DemoConfig, Scene};
use pathfollow_core::Offset;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pathfollow")]
#[command(about = "An arrowhead following a figure-eight, rendered headless")]
#[command(version)]
struct Cli {
    /// JSON config file (defaults to the reference demo)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render PNG frames covering one loop
    Render {
        /// Output directory for frame_NNNN.png files
        #[arg(short, long)]
        out: PathBuf,

        /// Number of frames (defaults to fps x duration)
        #[arg(short, long)]
        frames: Option<u32>,
    },

    /// Print the frame at a given time as SVG
    Svg {
        /// Seconds since the animation appeared
        #[arg(short, long, default_value = "0")]
        time: f64,
    },

    /// Sample the curve at an offset
    Sample {
        /// Progress along the path, in [0, 1]
        #[arg(long)]
        offset: f64,

        /// Size of the curve's rectangle, as WIDTHxHEIGHT
        #[arg(short, long, default_value = "30x30", value_parser = parse_size)]
        size: Size,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pathfollow=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { out, frames } => cmd_render(config, &out, frames),
        Commands::Svg { time } => cmd_svg(config, time),
        Commands::Sample { offset, size } => cmd_sample(&config, offset, size),
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            DemoConfig::load(path)
        }
        None => Ok(DemoConfig::default()),
    }
}

fn cmd_render(config: DemoConfig, out: &Path, frames: Option<u32>) -> Result<()> {
    let per_loop = config.frames_per_loop();
    let count = frames.unwrap_or(per_loop);
    if count > per_loop {
        tracing::warn!(
            "{} frames requested but one loop is {}; later frames repeat",
            count,
            per_loop
        );
    }
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let mut scene = Scene::new(config).context("Invalid scene configuration")?;
    tracing::info!("Rendering {} frames into {}", count, out.display());

    for index in 0..count {
        let frame = scene.frame_at(scene.frame_time(index));
        let pixmap = render_frame(&frame, scene.config())?;
        write_png(&pixmap, &out.join(frame_file_name(index)))?;
    }

    tracing::info!("Done");
    Ok(())
}

fn cmd_svg(config: DemoConfig, time: f64) -> Result<()> {
    let mut scene = Scene::new(config).context("Invalid scene configuration")?;
    let frame = scene.frame_at(time);
    print!("{}", frame_to_svg(&frame, scene.config())?);
    Ok(())
}

fn cmd_sample(config: &DemoConfig, offset: f64, size: Size) -> Result<()> {
    let offset = Offset::new(offset)?;
    let report = sample_report(size, offset, config.trail_length);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    if !(w > 0.0 && w.is_finite() && h > 0.0 && h.is_finite()) {
        return Err(format!("size must be positive and finite, got {w}x{h}"));
    }
    Ok(Size::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("30x30"), Ok(Size::new(30.0, 30.0)));
        assert_eq!(parse_size("640X360"), Ok(Size::new(640.0, 360.0)));
        assert!(parse_size("30").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn test_parse_size_rejects_non_finite() {
        assert!(parse_size("NaNx30").is_err());
        assert!(parse_size("30xNaN").is_err());
        assert!(parse_size("infx30").is_err());
        assert!(parse_size("30x-inf").is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["pathfollow", "render", "--out", "frames", "--frames", "3"]);
        assert!(matches!(
            cli.command,
            Commands::Render { frames: Some(3), .. }
        ));

        let cli = Cli::parse_from(["pathfollow", "sample", "--offset", "0.25", "--config", "demo.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("demo.json")));
        assert!(matches!(cli.command, Commands::Sample { .. }));
    }
}
