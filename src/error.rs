//! Error types.
//!
//! Only setup can fail in a way the caller sees: the event loop, the window
//! and the GPU. Font problems are reported through [`FontError`] but never
//! stop the visualization; the scene simply stays without labels.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system supports Vulkan, Metal, DX12 or WebGPU")]
    NoAdapter,
    /// The surface reports no usable texture format.
    #[error("surface is not supported by the selected adapter")]
    SurfaceUnsupported,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur while loading or parsing a typeface file.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid typeface document.
    #[error("invalid typeface JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A glyph outline contains an unknown command or a bad number.
    #[error("malformed outline for glyph {glyph:?}: {message}")]
    Outline { glyph: char, message: String },
    /// The loader thread went away without delivering a result.
    #[error("font loader stopped before delivering a result")]
    LoaderDisconnected,
}

/// Errors that can occur when starting the visualizer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}
