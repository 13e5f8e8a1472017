//! Built-in constants and the configuration carried by [`crate::Visualizer`].

use std::path::PathBuf;

use crate::lorenz::{LorenzParams, LorenzState};

/// Maximum number of points kept in the attractor trail.
pub const TRAIL_CAPACITY: usize = 5000;

/// Uniform scale applied to raw Lorenz coordinates before display.
pub const DISPLAY_SCALE: f64 = 0.3;

/// Emit a state snapshot every this many accumulated points.
pub const LOG_INTERVAL: u64 = 100;

/// Stroke font shipped with the crate, covering digits and axis names.
pub const DEFAULT_FONT_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/axis_strokes.typeface.json"
);

/// Everything the visualizer needs to start. All fields have defaults; the
/// builder methods on [`crate::Visualizer`] are the intended way to change them.
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub params: LorenzParams,
    pub initial_state: LorenzState,
    pub trail_capacity: usize,
    pub display_scale: f64,
    pub log_interval: u64,
    pub font_path: PathBuf,
    pub title: String,
    pub window_size: (u32, u32),
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            params: LorenzParams::CLASSIC,
            initial_state: LorenzState::INITIAL,
            trail_capacity: TRAIL_CAPACITY,
            display_scale: DISPLAY_SCALE,
            log_interval: LOG_INTERVAL,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            title: "Lorenz Attractor".to_string(),
            window_size: (1280, 720),
        }
    }
}
