//! Frame kernel: the renderable, its animation state, and the run loop that drives both.
//!
//! # Invariants
//! - Loop state (`phase`, `pos`) is owned by `AnimationState`, never ambient.
//! - Each tick moves the renderable before it is drawn.
//! - The run loop stops only through its `StopToken`.

pub mod animation;
pub mod config;
pub mod driver;
pub mod renderable;

pub use animation::{AnimationConfig, AnimationState, PhaseMode};
pub use config::{ConfigError, DriverConfig};
pub use driver::{DriverError, DriverState, FrameDriver, StopToken, TickReport};
pub use renderable::Renderable;
