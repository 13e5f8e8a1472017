//! The per-frame simulation context.
//!
//! [`FrameDriver`] owns everything the animation mutates: the Lorenz state,
//! the trail of recent points, the curve built from it and the frame clock.
//! The host calls [`FrameDriver::tick`] once per display refresh; tests call
//! it in a loop with a [`ManualClock`](crate::time::ManualClock) and no
//! display at all.

use glam::Vec3;

use crate::config::VisualizerConfig;
use crate::lorenz::{self, LorenzParams, LorenzState};
use crate::scene::Vertex;
use crate::time::{Clock, SystemClock, Time};
use crate::trajectory::TrajectoryBuffer;

/// Color of the attractor curve.
pub const CURVE_COLOR: Vec3 = Vec3::ONE;

/// Lifecycle of the driver. There is no terminal phase; the loop runs until
/// the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Constructed, no frame run yet.
    Initializing,
    /// At least one frame has run.
    Running,
}

/// Connected line through the trail points, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    vertices: Vec<Vertex>,
}

impl Polyline {
    pub fn from_trail(trail: &TrajectoryBuffer, color: Vec3) -> Self {
        Self {
            vertices: trail.iter().map(|p| Vertex::new(p, color)).collect(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Diagnostic state emitted every few frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub frame: u64,
    pub state: LorenzState,
    /// Trail length before this frame's point was added.
    pub points: usize,
}

/// Integrates the attractor and maintains the trail, one frame per tick.
#[derive(Debug)]
pub struct FrameDriver<C: Clock = SystemClock> {
    params: LorenzParams,
    state: LorenzState,
    trail: TrajectoryBuffer,
    curve: Polyline,
    time: Time<C>,
    phase: DriverPhase,
    points_pushed: u64,
    log_interval: u64,
}

impl FrameDriver<SystemClock> {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> FrameDriver<C> {
    /// Driver whose frame timing comes from `clock`.
    pub fn with_clock(config: &VisualizerConfig, clock: C) -> Self {
        Self {
            params: config.params,
            state: config.initial_state,
            trail: TrajectoryBuffer::new(config.trail_capacity, config.display_scale),
            curve: Polyline::default(),
            time: Time::with_clock(clock),
            phase: DriverPhase::Initializing,
            points_pushed: 0,
            log_interval: config.log_interval,
        }
    }

    /// Run one frame: step the system, push the new point and rebuild the
    /// curve. Returns the diagnostic snapshot if one was due this frame.
    pub fn tick(&mut self) -> Option<Snapshot> {
        self.time.update();
        self.state = lorenz::step(self.state, &self.params);

        let snapshot = (self.log_interval > 0 && self.points_pushed % self.log_interval == 0)
            .then(|| Snapshot {
                frame: self.time.frame(),
                state: self.state,
                points: self.trail.len(),
            });
        if let Some(s) = &snapshot {
            tracing::info!(
                frame = s.frame,
                x = s.state.x,
                y = s.state.y,
                z = s.state.z,
                points = s.points,
                "attractor state"
            );
        }

        self.trail.push(&self.state);
        self.points_pushed += 1;
        self.curve = Polyline::from_trail(&self.trail, CURVE_COLOR);
        self.phase = DriverPhase::Running;

        snapshot
    }

    /// Run `frames` ticks back to back.
    pub fn run_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn state(&self) -> LorenzState {
        self.state
    }

    pub fn params(&self) -> &LorenzParams {
        &self.params
    }

    pub fn trail(&self) -> &TrajectoryBuffer {
        &self.trail
    }

    /// Curve built on the most recent tick.
    pub fn curve(&self) -> &Polyline {
        &self.curve
    }

    /// Frames run so far.
    pub fn frame(&self) -> u64 {
        self.time.frame()
    }

    pub fn time(&self) -> &Time<C> {
        &self.time
    }
}
