//! Arrowhead-on-a-figure-eight demo: scene composition, the looping timeline
//! and headless frame output on top of `pathfollow-core`.

pub mod animation;
pub mod config;
pub mod render;
pub mod scene;

pub use config::DemoConfig;
pub use scene::{Frame, Scene};
