use crate::animation::{AnimationConfig, AnimationState};
use crate::config::DriverConfig;
use crate::renderable::Renderable;
use glam::{Mat4, Vec3};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use towerclimb_common::{Color4, Geometry, Viewport};
use towerclimb_input::Action;
use towerclimb_render::{
    FrameSubmission, ProgramHandle, RenderBackend, RenderError, ShaderSources,
};

/// Cancellation flag for the run loop. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, backend not yet confirmed.
    Idle,
    /// Ticking. Terminal until the stop token is cancelled.
    Running,
}

/// Errors from the frame driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("frame driver has not been started")]
    NotStarted,
    #[error("frame driver is already running")]
    AlreadyStarted,
    #[error(transparent)]
    Backend(#[from] RenderError),
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// 1-based frame number.
    pub frame: u64,
    pub offset: Vec3,
    pub matrix: Mat4,
}

/// The animation loop: each tick moves the renderable, then hands it to the backend.
///
/// Scheduling is the caller's job. `step` runs exactly one tick; `run` repeats
/// `step` at a caller-supplied cadence until the stop token is cancelled.
pub struct FrameDriver<B: RenderBackend> {
    backend: B,
    renderable: Renderable,
    animation: AnimationState,
    config: AnimationConfig,
    clear_color: Color4,
    program: Option<ProgramHandle>,
    frame: u64,
    stop: StopToken,
}

impl<B: RenderBackend> FrameDriver<B> {
    pub fn new(backend: B, renderable: Renderable, config: AnimationConfig) -> Self {
        Self {
            backend,
            renderable,
            animation: AnimationState::new(),
            config,
            clear_color: Color4::default(),
            program: None,
            frame: 0,
            stop: StopToken::new(),
        }
    }

    /// Build a driver for `geometry` placed and tuned according to `config`.
    pub fn from_config(backend: B, geometry: Geometry, config: &DriverConfig) -> Self {
        let renderable = Renderable::new(config.initial_position(), geometry);
        let mut driver = Self::new(backend, renderable, config.animation);
        driver.clear_color = config.clear_color;
        driver
    }

    /// Confirm the backend, compile the program and enter `Running`.
    ///
    /// An unavailable backend is fatal. A program that fails to compile is not:
    /// the driver still starts and the failure is visible on the returned handle.
    pub fn start(&mut self, shaders: &ShaderSources) -> Result<ProgramHandle, DriverError> {
        if self.program.is_some() {
            return Err(DriverError::AlreadyStarted);
        }
        self.backend.ensure_ready()?;
        self.backend.set_clear_color(self.clear_color);

        let program = self.backend.compile_program(shaders);
        if !program.is_usable() {
            tracing::error!(program = program.id, "could not initialise shaders");
        }
        self.program = Some(program);
        tracing::info!(program = program.id, "frame driver running");
        Ok(program)
    }

    /// Run one tick: advance the phase, move the renderable, submit it.
    pub fn step(&mut self) -> Result<TickReport, DriverError> {
        let program = self.program.ok_or(DriverError::NotStarted)?;

        let offset = self.animation.advance(&self.config);
        let matrix = self.renderable.move_by(offset);
        self.frame += 1;

        self.backend.render(&FrameSubmission {
            vertices: self.renderable.vertices(),
            indices: self.renderable.indices(),
            transform: matrix,
            program,
        })?;

        tracing::trace!(
            frame = self.frame,
            phase = self.animation.phase(),
            x = offset.x,
            y = offset.y,
            "tick"
        );

        Ok(TickReport {
            frame: self.frame,
            offset,
            matrix,
        })
    }

    /// Tick until the stop token is cancelled. `pace` is called before each
    /// tick and should block for one frame interval (or cancel the token).
    /// Returns the number of ticks executed.
    pub fn run(&mut self, mut pace: impl FnMut()) -> Result<u64, DriverError> {
        if self.program.is_none() {
            return Err(DriverError::NotStarted);
        }
        let mut ticks = 0;
        while !self.stop.is_cancelled() {
            pace();
            if self.stop.is_cancelled() {
                break;
            }
            self.step()?;
            ticks += 1;
        }
        tracing::info!(ticks, frame = self.frame, "frame driver stopped");
        Ok(ticks)
    }

    /// Apply an input action. Nudges only update the tracked `pos` scalar.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Nudge(direction) => {
                self.animation.nudge(direction);
                tracing::debug!(pos = self.animation.pos(), "nudge");
            }
            Action::Stop => self.stop.cancel(),
            Action::Noop => {}
        }
    }

    /// Forward a surface resize to the backend.
    pub fn resize(&mut self, viewport: Viewport) {
        self.backend.resize(viewport);
    }

    pub fn state(&self) -> DriverState {
        if self.program.is_some() {
            DriverState::Running
        } else {
            DriverState::Idle
        }
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    pub fn renderable(&self) -> &Renderable {
        &self.renderable
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
