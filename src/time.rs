//! Frame timing with an injectable clock.
//!
//! [`Time`] counts frames and tracks elapsed time, delta time and FPS. It reads
//! the current instant from a [`Clock`], so the frame loop can be driven by
//! the wall clock in the application and by a [`ManualClock`] in tests.
//!
//! # Example
//!
//! ```
//! use lorenz_axes::time::{ManualClock, Time};
//! use std::time::Duration;
//!
//! let mut time = Time::with_clock(ManualClock::new(Duration::from_millis(16)));
//! time.update();
//! time.update();
//! assert_eq!(time.frame(), 2);
//! assert!((time.elapsed() - 0.032).abs() < 1e-6);
//! ```

use std::time::{Duration, Instant};

/// Source of monotonically increasing time since some fixed origin.
pub trait Clock {
    /// Time since the clock's origin.
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances by a fixed step every time it is read.
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Duration,
    step: Duration,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }

    /// A clock ticking at 60 Hz.
    pub fn sixty_hz() -> Self {
        Self::new(Duration::from_micros(16_667))
    }

    /// Move the clock forward without producing a reading.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Duration {
        self.now += self.step;
        self.now
    }
}

/// Frame counter and timing for the render loop.
#[derive(Debug)]
pub struct Time<C: Clock = SystemClock> {
    clock: C,
    /// Clock reading at creation.
    start: Duration,
    /// Clock reading at the previous update.
    last_frame: Duration,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    /// Frame count and clock reading at the last FPS refresh.
    fps_frame_count: u64,
    fps_update_time: Duration,
    fps_update_interval: Duration,
}

impl Time<SystemClock> {
    /// Time tracker on the wall clock, starting now.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }
}

impl Default for Time<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Time<C> {
    pub fn with_clock(mut clock: C) -> Self {
        let start = clock.now();
        Self {
            clock,
            start,
            last_frame: start,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record a new frame. Returns `(elapsed, delta)` in seconds.
    pub fn update(&mut self) -> (f32, f32) {
        let now = self.clock.now();

        self.delta_secs = now.saturating_sub(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_secs = now.saturating_sub(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.saturating_sub(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames recorded since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the FPS figure changed on the most recent update.
    pub fn fps_refreshed(&self) -> bool {
        self.frame_count > 0 && self.fps_frame_count == self.frame_count
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_manual_clock_update() {
        let mut time = Time::with_clock(ManualClock::new(Duration::from_millis(10)));
        let (elapsed, delta) = time.update();

        assert!((elapsed - 0.01).abs() < 1e-6);
        assert!((delta - 0.01).abs() < 1e-6);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_elapsed_accumulates() {
        let mut time = Time::with_clock(ManualClock::new(Duration::from_millis(20)));
        for _ in 0..50 {
            time.update();
        }
        assert_eq!(time.frame(), 50);
        assert!((time.elapsed() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fps_from_fixed_step() {
        let mut time = Time::with_clock(ManualClock::new(Duration::from_millis(10)));
        let mut refreshed = 0;
        for _ in 0..100 {
            time.update();
            if time.fps_refreshed() {
                refreshed += 1;
            }
        }
        assert_eq!(refreshed, 2);
        assert!((time.fps() - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_stalled_clock_gives_long_delta() {
        let mut time = Time::with_clock(ManualClock::new(Duration::from_millis(10)));
        time.update();
        time.clock_mut().advance(Duration::from_millis(490));
        let (_, delta) = time.update();
        assert!((delta - 0.5).abs() < 1e-5);
    }
}
