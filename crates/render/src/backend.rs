use glam::Mat4;
use towerclimb_common::{Color4, Viewport};

/// Errors surfaced by a render backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// The graphics context could not be created or was lost. Fatal at startup.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    /// Acquiring or presenting the frame failed.
    #[error("surface error: {0}")]
    Surface(String),
}

/// Vertex and fragment shader source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Whether a compiled program can actually be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    Linked,
    /// Compilation or linking failed. Draw calls using it are skipped.
    Unusable,
}

/// Opaque handle to a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramHandle {
    pub id: u32,
    pub status: ProgramStatus,
}

impl ProgramHandle {
    pub fn is_usable(&self) -> bool {
        self.status == ProgramStatus::Linked
    }
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSubmission<'a> {
    pub vertices: &'a [f32],
    pub indices: &'a [u16],
    pub transform: Mat4,
    pub program: ProgramHandle,
}

/// Graphics backend interface. The driver treats implementors as an opaque sink.
///
/// Buffer management is the backend's business: `init_buffers` uploads the
/// frame's geometry and transform and returns whatever handle `draw` needs.
pub trait RenderBackend {
    /// Backend-specific handle produced by `init_buffers`.
    type Buffers;

    /// Confirm the graphics context is usable. Failure is fatal at startup.
    fn ensure_ready(&self) -> Result<(), RenderError>;

    /// Compile and link a program. Never fails hard: problems are logged and
    /// reported through the handle's status.
    fn compile_program(&mut self, shaders: &ShaderSources) -> ProgramHandle;

    fn set_clear_color(&mut self, color: Color4);

    /// The display surface changed size.
    fn resize(&mut self, viewport: Viewport);

    /// Upload geometry, bind the program and set the transform uniform.
    fn init_buffers(&mut self, frame: &FrameSubmission<'_>) -> Result<Self::Buffers, RenderError>;

    /// Clear, set the viewport and issue an indexed triangle-list draw.
    fn draw(&mut self, index_count: u32, buffers: &Self::Buffers) -> Result<(), RenderError>;

    /// Upload then draw.
    fn render(&mut self, frame: &FrameSubmission<'_>) -> Result<(), RenderError> {
        let buffers = self.init_buffers(frame)?;
        self.draw(frame.indices.len() as u32, &buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_usability_follows_status() {
        let ok = ProgramHandle {
            id: 1,
            status: ProgramStatus::Linked,
        };
        let bad = ProgramHandle {
            id: 2,
            status: ProgramStatus::Unusable,
        };
        assert!(ok.is_usable());
        assert!(!bad.is_usable());
    }

    #[test]
    fn render_error_messages() {
        let e = RenderError::ContextUnavailable("no adapter".into());
        assert_eq!(e.to_string(), "graphics context unavailable: no adapter");
    }
}
