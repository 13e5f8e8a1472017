//! Visualizer builder and runner.

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::{Camera, OrbitControls};
use crate::config::VisualizerConfig;
use crate::driver::{FrameDriver, Snapshot};
use crate::error::AppError;
use crate::font::{self, PendingFont};
use crate::gpu::GpuState;
use crate::input::Input;
use crate::lorenz::{LorenzParams, LorenzState};
use crate::scene::{LabelState, Scene};
use crate::time::{Clock, SystemClock};

/// The Lorenz attractor visualizer.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```no_run
/// use lorenz_axes::Visualizer;
///
/// Visualizer::new()
///     .with_trail_length(2000)
///     .with_title("Lorenz")
///     .run()
///     .expect("visualizer failed");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    config: VisualizerConfig,
}

impl Visualizer {
    /// Create a visualizer with the classic parameters and default scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set σ, ρ, β and the step size.
    pub fn with_params(mut self, params: LorenzParams) -> Self {
        self.config.params = params;
        self
    }

    /// Set the point the trace starts from.
    pub fn with_initial_state(mut self, state: LorenzState) -> Self {
        self.config.initial_state = state;
        self
    }

    /// Set the maximum number of points kept in the trail.
    pub fn with_trail_length(mut self, points: usize) -> Self {
        self.config.trail_capacity = points;
        self
    }

    /// Set the scale applied to Lorenz coordinates before display.
    pub fn with_display_scale(mut self, scale: f64) -> Self {
        self.config.display_scale = scale;
        self
    }

    /// Log a state snapshot every `points` points. Zero disables it.
    pub fn with_log_interval(mut self, points: u64) -> Self {
        self.config.log_interval = points;
        self
    }

    /// Load axis labels from this typeface file.
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window_size = (width, height);
        self
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Open the window and animate until it is closed.
    pub fn run(self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        tracing::info!(
            sigma = self.config.params.sigma,
            rho = self.config.params.rho,
            beta = self.config.params.beta,
            dt = self.config.params.dt,
            trail = self.config.trail_capacity,
            "starting visualizer"
        );

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything that changes from frame to frame, minus the GPU.
///
/// Owns the frame driver, the scene, the camera and its controls, and the
/// font that is still loading. Window events and redraws are forwarded here,
/// which keeps the frame logic testable without a display.
pub struct ViewState<C: Clock = SystemClock> {
    pub driver: FrameDriver<C>,
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub input: Input,
    pending_font: Option<PendingFont>,
}

impl<C: Clock> ViewState<C> {
    pub fn new(config: &VisualizerConfig, clock: C, font: Option<PendingFont>) -> Self {
        let (width, height) = config.window_size;
        let mut scene = Scene::new();
        if font.is_none() {
            scene.mark_labels_unavailable();
        }
        Self {
            driver: FrameDriver::with_clock(config, clock),
            scene,
            camera: Camera::new(width, height),
            controls: OrbitControls::default(),
            input: Input::new(),
            pending_font: font,
        }
    }

    /// Attach labels if the font has arrived since the last call.
    pub fn poll_font(&mut self) -> LabelState {
        if let Some(pending) = &mut self.pending_font {
            if let Some(result) = pending.poll() {
                self.pending_font = None;
                self.scene.resolve_font(result);
            }
        }
        self.scene.label_state()
    }

    /// Run one frame of everything but drawing.
    pub fn advance(&mut self) -> Option<Snapshot> {
        self.poll_font();
        let snapshot = self.driver.tick();
        self.controls.handle_input(&self.input);
        self.controls.update(&mut self.camera);
        self.input.begin_frame();
        snapshot
    }

    /// The viewport changed size. Only the camera is affected.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}

struct App {
    config: VisualizerConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    view: ViewState,
    error: Option<AppError>,
}

impl App {
    fn new(config: VisualizerConfig) -> Self {
        let font = font::load(config.font_path.clone());
        let view = ViewState::new(&config, SystemClock::new(), Some(font));
        Self {
            config,
            window: None,
            gpu_state: None,
            view,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        tracing::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) else {
            return;
        };

        self.view.advance();
        gpu_state.set_scene(&self.view.scene);
        gpu_state.upload_curve(self.view.driver.curve());

        match gpu_state.render(&self.view.camera) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => tracing::error!("render error: {e:?}"),
        }

        let time = self.view.driver.time();
        if time.fps_refreshed() {
            window.set_title(&format!("{} - {:.0} FPS", self.config.title, time.fps()));
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let gpu_state = match pollster::block_on(GpuState::new(
            window.clone(),
            self.config.trail_capacity,
        )) {
            Ok(state) => state,
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        self.view.resize(size.width, size.height);
        window.request_redraw();

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.view.resize(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                self.view.input.handle_event(&other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;
    use crate::time::ManualClock;

    fn view(font: Option<PendingFont>) -> ViewState<ManualClock> {
        ViewState::new(&VisualizerConfig::default(), ManualClock::sixty_hz(), font)
    }

    #[test]
    fn test_builder_sets_config() {
        let viz = Visualizer::new()
            .with_trail_length(10)
            .with_display_scale(1.0)
            .with_log_interval(0)
            .with_title("t")
            .with_window_size(640, 480);

        let config = viz.config();
        assert_eq!(config.trail_capacity, 10);
        assert_eq!(config.display_scale, 1.0);
        assert_eq!(config.log_interval, 0);
        assert_eq!(config.title, "t");
        assert_eq!(config.window_size, (640, 480));
        assert_eq!(config.params, LorenzParams::CLASSIC);
    }

    #[test]
    fn test_resize_leaves_simulation_alone() {
        let mut view = view(None);
        view.advance();
        view.advance();
        let state = view.driver.state();
        let trail: Vec<_> = view.driver.trail().iter().collect();

        view.resize(300, 900);

        assert!((view.camera.aspect() - 300.0 / 900.0).abs() < 1e-6);
        assert_eq!(view.driver.state(), state);
        assert_eq!(view.driver.trail().iter().collect::<Vec<_>>(), trail);
        assert_eq!(view.driver.frame(), 2);
    }

    #[test]
    fn test_labels_attach_on_next_frame() {
        let font = Font::from_path(std::path::Path::new(crate::config::DEFAULT_FONT_PATH)).unwrap();
        let mut view = view(Some(PendingFont::resolved("axis", Ok(font))));
        assert_eq!(view.scene.label_state(), LabelState::Pending);

        view.advance();
        assert_eq!(view.scene.label_state(), LabelState::Ready);
        assert_eq!(view.scene.tick_count(), 60);
    }

    #[test]
    fn test_no_font_means_no_labels() {
        let mut view = view(None);
        view.advance();
        assert_eq!(view.scene.label_state(), LabelState::Unavailable);
    }
}
