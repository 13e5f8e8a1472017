//! The Lorenz system and its explicit Euler step.
//!
//! The attractor is defined by three coupled differential equations:
//!
//! ```text
//! dx/dt = σ(y - x)
//! dy/dt = x(ρ - z) - y
//! dz/dt = xy - βz
//! ```
//!
//! With the classic parameters σ=10, ρ=28, β=8/3 the trajectory never settles
//! and never escapes, tracing the two-lobed butterfly shape.

use glam::Vec3;

/// Parameters of the Lorenz system plus the integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    /// σ, coupling between x and y.
    pub sigma: f64,
    /// ρ, drives the y equation.
    pub rho: f64,
    /// β, damping on z.
    pub beta: f64,
    /// Fixed time step per frame. Expected to be positive; not validated.
    pub dt: f64,
}

impl LorenzParams {
    /// Classic chaotic parameters with a step of 0.005.
    pub const CLASSIC: Self = Self {
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
        dt: 0.005,
    };

    /// Rates of change `(dx/dt, dy/dt, dz/dt)` at `state`.
    pub fn derivatives(&self, state: LorenzState) -> LorenzState {
        LorenzState {
            x: self.sigma * (state.y - state.x),
            y: state.x * (self.rho - state.z) - state.y,
            z: state.x * state.y - self.beta * state.z,
        }
    }
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// A point in the system's phase space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LorenzState {
    /// Starting point of the animated trace.
    pub const INITIAL: Self = Self::new(0.1, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Multiply every component by `factor` and narrow to a render vector.
    ///
    /// The product is taken in `f64` so the result is the nearest `f32` to the
    /// exact scaled value.
    pub fn scaled(&self, factor: f64) -> Vec3 {
        Vec3::new(
            (self.x * factor) as f32,
            (self.y * factor) as f32,
            (self.z * factor) as f32,
        )
    }

    /// Whether all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for LorenzState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Advance `state` by one explicit Euler step of size `params.dt`.
///
/// Pure: the same inputs always produce the same output.
pub fn step(state: LorenzState, params: &LorenzParams) -> LorenzState {
    let rate = params.derivatives(state);
    LorenzState {
        x: state.x + rate.x * params.dt,
        y: state.y + rate.y * params.dt,
        z: state.z + rate.z * params.dt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_first_step_from_initial_point() {
        let next = step(LorenzState::INITIAL, &LorenzParams::CLASSIC);

        assert!(approx(next.x, 0.095));
        assert!(approx(next.y, 0.014));
        assert!(approx(next.z, 0.0));
    }

    #[test]
    fn test_origin_is_fixed_point() {
        let origin = LorenzState::new(0.0, 0.0, 0.0);
        assert_eq!(step(origin, &LorenzParams::CLASSIC), origin);
    }

    #[test]
    fn test_step_matches_rate_times_dt() {
        let params = LorenzParams {
            dt: 0.01,
            ..LorenzParams::CLASSIC
        };
        let state = LorenzState::new(1.0, 2.0, 3.0);
        let rate = params.derivatives(state);
        let next = step(state, &params);

        // sigma * (2 - 1) = 10, 1 * (28 - 3) - 2 = 23, 1 * 2 - 8/3 * 3 = -6
        assert!(approx(rate.x, 10.0));
        assert!(approx(rate.y, 23.0));
        assert!(approx(rate.z, -6.0));
        assert!(approx(next.x, 1.1));
        assert!(approx(next.y, 2.23));
        assert!(approx(next.z, 2.94));
    }

    #[test]
    fn test_stays_bounded_over_long_run() {
        let mut state = LorenzState::INITIAL;
        for _ in 0..100_000 {
            state = step(state, &LorenzParams::CLASSIC);
        }
        assert!(state.is_finite());
        assert!(state.x.abs() < 30.0 && state.y.abs() < 40.0);
        assert!(state.z > -1.0 && state.z < 60.0);
    }

    #[test]
    fn test_scaled_narrows_after_scaling() {
        let state = LorenzState::new(0.095, 0.014, -2.5);
        let v = state.scaled(0.3);
        assert_eq!(v, Vec3::new((0.095f64 * 0.3) as f32, (0.014f64 * 0.3) as f32, -0.75));
    }
}
