//! Pointer input tracking.
//!
//! `Input` turns raw winit window events into per-frame pointer state: which
//! buttons are held, how far the cursor moved and how much the wheel scrolled
//! since the last frame. The orbit controls read it once per frame, after
//! which [`Input::begin_frame`] clears the per-frame parts.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(button: WinitMouseButton) -> Option<Self> {
        match button {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Pointer state for the current frame.
#[derive(Debug, Default)]
pub struct Input {
    mouse_held: HashSet<MouseButton>,
    /// Last cursor position, unknown until the first move.
    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    scroll_delta: f32,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Cursor movement since the last frame, in pixels.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll since the last frame, in lines. Positive is away from the user.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Clear per-frame motion. Held buttons persist.
    pub fn begin_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Process a winit window event. Returns `true` if it was pointer input.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = MouseButton::from_winit(*button) else {
                    return false;
                };
                match state {
                    ElementState::Pressed => self.press_mouse(button),
                    ElementState::Released => self.release_mouse(button),
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some(last) = self.mouse_position {
                    self.move_mouse(position - last);
                }
                self.mouse_position = Some(position);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.scroll(lines);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn press_mouse(&mut self, button: MouseButton) {
        self.mouse_held.insert(button);
    }

    pub(crate) fn release_mouse(&mut self, button: MouseButton) {
        self.mouse_held.remove(&button);
    }

    pub(crate) fn move_mouse(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    pub(crate) fn scroll(&mut self, lines: f32) {
        self.scroll_delta += lines;
    }
}
