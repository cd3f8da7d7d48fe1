use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use towerclimb_common::{Geometry, Viewport};
use towerclimb_input::{Key, map_key};
use towerclimb_kernel::{DriverConfig, FrameDriver, PhaseMode};
use towerclimb_render::ShaderSources;
use towerclimb_render_wgpu::{WgpuBackend, default_shaders};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "towerclimb-desktop", about = "Animate a single quad in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON driver configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Advance the phase once per tick instead of twice
    #[arg(long)]
    single_phase: bool,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// WGSL vertex shader replacing the built-in one
    #[arg(long)]
    vertex_shader: Option<PathBuf>,

    /// WGSL fragment shader replacing the built-in one
    #[arg(long)]
    fragment_shader: Option<PathBuf>,
}

fn map_keycode(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

struct App {
    config: DriverConfig,
    shaders: ShaderSources,
    initial_size: PhysicalSize<u32>,
    max_frames: Option<u64>,
    window: Option<Arc<Window>>,
    driver: Option<FrameDriver<WgpuBackend>>,
    /// Set when startup fails; returned from `main` after the loop exits.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(
        config: DriverConfig,
        shaders: ShaderSources,
        initial_size: PhysicalSize<u32>,
        max_frames: Option<u64>,
    ) -> Self {
        Self {
            config,
            shaders,
            initial_size,
            max_frames,
            window: None,
            driver: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Tower Climb")
            .with_inner_size(self.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let backend = WgpuBackend::new(window.clone(), Viewport::new(size.width, size.height))
            .context("WebGPU is not supported on this system")?;

        let geometry = Geometry::quad();
        if let Err(e) = geometry.validate() {
            tracing::warn!("geometry failed validation, drawing anyway: {e}");
        }

        let mut driver = FrameDriver::from_config(backend, geometry, &self.config);
        driver.start(&self.shaders)?;

        window.request_redraw();
        self.window = Some(window);
        self.driver = Some(driver);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(driver) = &mut self.driver else {
            return;
        };
        if driver.stop_token().is_cancelled() {
            event_loop.exit();
            return;
        }

        if let Err(e) = driver.step() {
            tracing::error!("frame {} failed: {e}", driver.frame());
        }

        if self.max_frames.is_some_and(|max| driver.frame() >= max) {
            tracing::info!(frames = driver.frame(), "frame limit reached");
            driver.stop_token().cancel();
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(driver) = &self.driver {
                    driver.stop_token().cancel();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(driver) = &mut self.driver {
                    driver.resize(Viewport::new(new_size.width, new_size.height));
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(driver) = &mut self.driver {
                    driver.handle_action(map_key(map_keycode(code)));
                    if driver.stop_token().is_cancelled() {
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_shaders(cli: &Cli) -> Result<ShaderSources> {
    let mut shaders = default_shaders();
    if let Some(path) = &cli.vertex_shader {
        shaders.vertex = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read vertex shader {}", path.display()))?;
    }
    if let Some(path) = &cli.fragment_shader {
        shaders.fragment = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fragment shader {}", path.display()))?;
    }
    Ok(shaders)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("towerclimb-desktop starting");

    let mut config = match &cli.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DriverConfig::default(),
    };
    if cli.single_phase {
        config.animation.phase_mode = PhaseMode::Single;
    }
    let shaders = load_shaders(&cli)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(
        config,
        shaders,
        PhysicalSize::new(cli.width, cli.height),
        cli.max_frames,
    );
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.error.take() {
        return Err(e);
    }
    if let Some(driver) = &app.driver {
        tracing::info!(
            frames = driver.frame(),
            pos = driver.animation().pos(),
            "towerclimb-desktop exiting"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use towerclimb_input::{Action, NudgeDirection};

    #[test]
    fn arrow_keys_become_nudges() {
        assert_eq!(
            map_key(map_keycode(KeyCode::ArrowLeft)),
            Action::Nudge(NudgeDirection::Left)
        );
        assert_eq!(
            map_key(map_keycode(KeyCode::ArrowRight)),
            Action::Nudge(NudgeDirection::Right)
        );
        assert_eq!(map_key(map_keycode(KeyCode::Escape)), Action::Stop);
        assert_eq!(map_key(map_keycode(KeyCode::KeyW)), Action::Noop);
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["towerclimb-desktop"]);
        assert_eq!(cli.width, 1280);
        assert_eq!(cli.height, 720);
        assert!(!cli.single_phase);
        assert!(cli.max_frames.is_none());
    }

    #[test]
    fn shaders_default_without_overrides() {
        let cli = Cli::parse_from(["towerclimb-desktop"]);
        assert_eq!(load_shaders(&cli).unwrap(), default_shaders());
    }
}
