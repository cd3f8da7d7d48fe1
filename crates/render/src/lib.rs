//! Rendering Adapter: backend-agnostic interface.
//!
//! # Invariants
//! - Backends never mutate geometry or transform state; they only consume it.
//! - Shader failures degrade the program, they never abort the loop.
//!
//! The `RecordingBackend` stands in for a GPU when running headless or in
//! tests. The trait is stable; the wgpu backend implements it without
//! changing consumers.

mod backend;
mod recording;

pub use backend::{
    FrameSubmission, ProgramHandle, ProgramStatus, RenderBackend, RenderError, ShaderSources,
};
pub use recording::{RecordedBuffers, RecordedFrame, RecordingBackend};

pub fn crate_info() -> &'static str {
    "towerclimb-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
