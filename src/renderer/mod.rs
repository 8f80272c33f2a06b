//! Rendering module
//!
//! The scene builder tessellates the match into colored triangles in
//! playfield pixels; the WebGPU pipeline maps them to the viewport.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use scene::{Scene, banner_text, build_scene};
pub use vertex::{Palette, Vertex};

/// Failures while acquiring the GPU at startup. Once the loop is running,
/// rendering problems are logged and the frame is skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("page element `{0}` not found")]
    MissingElement(&'static str),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no usable texture format")]
    NoSurfaceFormat,
}
