use crate::backend::{
    FrameSubmission, ProgramHandle, ProgramStatus, RenderBackend, RenderError, ShaderSources,
};
use glam::Mat4;
use towerclimb_common::{Color4, Viewport};

/// Buffers "uploaded" by the recording backend: an owned copy of the submission.
#[derive(Debug, Clone)]
pub struct RecordedBuffers {
    pub upload: u64,
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
    pub transform: Mat4,
    pub program: ProgramHandle,
}

/// One frame as the recording backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedFrame {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
    pub transform: Mat4,
    pub program: ProgramHandle,
    pub viewport: Viewport,
    pub clear_color: Color4,
    pub index_count: u32,
    /// False when the draw call was skipped because the program is unusable.
    pub drawn: bool,
}

/// Headless backend that records every submission instead of drawing it.
///
/// Used by the CLI and as the test double for the frame driver.
#[derive(Debug)]
pub struct RecordingBackend {
    available: bool,
    viewport: Viewport,
    clear_color: Color4,
    next_program: u32,
    uploads: u64,
    frames: Vec<RecordedFrame>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl RecordingBackend {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            available: true,
            viewport,
            clear_color: Color4::default(),
            next_program: 1,
            uploads: 0,
            frames: Vec::new(),
        }
    }

    /// A backend whose context is missing, for exercising startup failure.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Number of `init_buffers` calls so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn clear_color(&self) -> Color4 {
        self.clear_color
    }

    /// Human-readable summary of the recorded frames.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Recorded frames: {} (uploads={}) ===\n",
            self.frames.len(),
            self.uploads
        ));
        out.push_str(&format!(
            "Viewport: {}x{}  Clear: {:?}\n",
            self.viewport.width,
            self.viewport.height,
            self.clear_color.to_array()
        ));
        for (i, frame) in self.frames.iter().enumerate() {
            let t = frame.transform.w_axis;
            out.push_str(&format!(
                "  [{i:>4}] translation=({:.6}, {:.6}, {:.6}) indices={} drawn={}\n",
                t.x, t.y, t.z, frame.index_count, frame.drawn
            ));
        }
        out
    }
}

impl RenderBackend for RecordingBackend {
    type Buffers = RecordedBuffers;

    fn ensure_ready(&self) -> Result<(), RenderError> {
        if self.available {
            Ok(())
        } else {
            Err(RenderError::ContextUnavailable(
                "recording backend created without a context".into(),
            ))
        }
    }

    fn compile_program(&mut self, shaders: &ShaderSources) -> ProgramHandle {
        let id = self.next_program;
        self.next_program += 1;

        let mut status = ProgramStatus::Linked;
        if shaders.vertex.trim().is_empty() {
            tracing::error!(program = id, "vertex shader failed to compile: empty source");
            status = ProgramStatus::Unusable;
        }
        if shaders.fragment.trim().is_empty() {
            tracing::error!(program = id, "fragment shader failed to compile: empty source");
            status = ProgramStatus::Unusable;
        }
        ProgramHandle { id, status }
    }

    fn set_clear_color(&mut self, color: Color4) {
        self.clear_color = color;
    }

    fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(width = viewport.width, height = viewport.height, "resize");
        self.viewport = viewport;
    }

    fn init_buffers(&mut self, frame: &FrameSubmission<'_>) -> Result<RecordedBuffers, RenderError> {
        self.uploads += 1;
        Ok(RecordedBuffers {
            upload: self.uploads,
            vertices: frame.vertices.to_vec(),
            indices: frame.indices.to_vec(),
            transform: frame.transform,
            program: frame.program,
        })
    }

    fn draw(&mut self, index_count: u32, buffers: &RecordedBuffers) -> Result<(), RenderError> {
        let drawn = buffers.program.is_usable();
        if !drawn {
            tracing::trace!(program = buffers.program.id, "skipping draw with unusable program");
        }
        self.frames.push(RecordedFrame {
            vertices: buffers.vertices.clone(),
            indices: buffers.indices.clone(),
            transform: buffers.transform,
            program: buffers.program,
            viewport: self.viewport,
            clear_color: self.clear_color,
            index_count,
            drawn,
        });
        Ok(())
    }
}
