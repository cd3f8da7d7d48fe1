//! wgpu render backend.
//!
//! Uploads the frame's vertex and index buffers, sets the model-view uniform
//! and issues one indexed triangle-list draw per frame.
//!
//! # Invariants
//! - The backend never mutates geometry or transform state.
//! - Shader errors are captured and logged; they never panic the device.

mod gpu;
mod shaders;

pub use gpu::{WgpuBackend, WgpuBuffers};
pub use shaders::default_shaders;
