//! # Lorenz Axes - live Lorenz attractor viewer
//!
//! Integrates the Lorenz system one explicit Euler step per frame and draws
//! the most recent points as a white curve inside a labelled set of 3D axes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lorenz_axes::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     Visualizer::new()
//!         .with_params(LorenzParams::CLASSIC)
//!         .with_trail_length(5000)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Integration
//!
//! [`lorenz::step`] advances a [`LorenzState`] by one step of size `dt`:
//!
//! ```text
//! x' = x + σ(y − x)·dt
//! y' = y + (x(ρ − z) − y)·dt
//! z' = z + (xy − βz)·dt
//! ```
//!
//! State stays in `f64`; only the displayed points are narrowed to `f32`.
//!
//! ### Trail
//!
//! [`TrajectoryBuffer`] keeps the newest points, scaled by 0.3, oldest
//! first. Once full, each push drops the oldest point.
//!
//! ### Scene
//!
//! [`Scene`] holds the static geometry: three colored axes from −10 to 10,
//! a cone at each end, ticks every unit and their number labels. Ticks and
//! labels appear once the stroke font finishes loading in the background.
//!
//! ### Frames
//!
//! [`FrameDriver`] runs one frame at a time and can be driven headless with a
//! [`ManualClock`], which is how the tests exercise it.
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`. The binary installs a
//! `tracing-subscriber` formatter honoring `RUST_LOG` (default `info`).

pub mod app;
pub mod camera;
pub mod config;
pub mod driver;
pub mod error;
pub mod font;
mod gpu;
pub mod input;
pub mod lorenz;
pub mod scene;
pub mod time;
pub mod trajectory;

pub use app::{ViewState, Visualizer};
pub use camera::{Camera, OrbitControls};
pub use config::VisualizerConfig;
pub use driver::{DriverPhase, FrameDriver, Polyline, Snapshot};
pub use error::{AppError, FontError, GpuError};
pub use font::{Font, PendingFont};
pub use glam::{Vec2, Vec3};
pub use lorenz::{LorenzParams, LorenzState};
pub use scene::{Axis, Label, LabelState, Scene, Vertex};
pub use time::{Clock, ManualClock, SystemClock, Time};
pub use trajectory::TrajectoryBuffer;

/// Convenient re-exports for common usage.
///
/// ```no_run
/// use lorenz_axes::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::Visualizer;
    pub use crate::error::AppError;
    pub use crate::lorenz::{LorenzParams, LorenzState};
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
