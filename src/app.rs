//! Native window, input, and the real-time game loop
//!
//! Rendering runs at display rate; the simulation is advanced in fixed
//! substeps from an accumulator, so wall-clock jitter never changes the
//! physics.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;
use crate::renderer::{RenderState, shapes};
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

const WINDOW_TITLE: &str = "Pong";

/// The game application. Owns the window, the renderer, and the loop.
pub struct Game {
    debug: bool,
}

impl Game {
    pub fn new() -> Self {
        Self { debug: false }
    }

    /// Open the window and run the game until the player quits.
    ///
    /// Debug mode draws the computer player's prediction path and enables
    /// the freeze/step keys.
    pub fn run(mut self, debug: bool) -> Result<()> {
        self.debug = debug;

        let tuning = Tuning::load_or_default()?;
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Starting game with seed {}", seed);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(GameState::new(seed, tuning), self.debug);
        event_loop.run_app(&mut app)?;

        if let Some(err) = app.fatal {
            return Err(err);
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-run application state driven by the winit event loop
struct App {
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    state: GameState,
    input: TickInput,
    accumulator: f32,
    last_time: Option<Instant>,
    debug: bool,
    /// Debug freeze: the sim holds still while the scene keeps drawing
    frozen: bool,
    /// Debug single-step request, honored while frozen
    step_once: bool,
    /// Setup error captured inside the loop, surfaced after it exits
    fatal: Option<crate::error::AppError>,
}

impl App {
    fn new(state: GameState, debug: bool) -> Self {
        Self {
            window: None,
            render_state: None,
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
            debug,
            frozen: false,
            step_once: false,
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.state.tuning.field_width,
                self.state.tuning.field_height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            (self.state.tuning.field_width, self.state.tuning.field_height),
        ))?;

        self.window = Some(window);
        self.render_state = Some(render_state);
        Ok(())
    }

    /// Map a key transition onto the tick input. Up/down are held flags;
    /// pause and quit are one-shots raised on press.
    fn handle_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        match code {
            KeyCode::ArrowUp => self.input.p1_up = pressed,
            KeyCode::ArrowDown => self.input.p1_down = pressed,
            KeyCode::KeyP if pressed && !repeat => self.input.pause = true,
            KeyCode::Escape if pressed => self.input.quit = true,
            KeyCode::KeyD if pressed && !repeat && self.debug => {
                self.frozen = !self.frozen;
                if self.frozen {
                    log::info!("Simulation frozen at tick {}", self.state.time_ticks);
                    self.log_snapshot();
                } else {
                    log::info!("Simulation resumed");
                }
            }
            KeyCode::KeyN if pressed && self.debug && self.frozen => {
                self.step_once = true;
            }
            _ => {}
        }
    }

    fn log_snapshot(&self) {
        match serde_json::to_string_pretty(&self.state) {
            Ok(json) => log::info!("State snapshot:\n{}", json),
            Err(err) => log::warn!("Could not serialize state snapshot: {}", err),
        }
    }

    /// Drain the accumulator in fixed substeps.
    fn pump_sim(&mut self, dt: f32) {
        // Clamp long stalls so the sim never has to catch up a whole pause
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.frozen && !self.step_once {
                continue;
            }
            if self.step_once {
                self.step_once = false;
                tick(&mut self.state, &self.input);
                self.input.pause = false;
                self.input.quit = false;
                log::info!("Stepped to tick {}", self.state.time_ticks);
                self.log_snapshot();
                // One tick per N press
                self.frozen = true;
                continue;
            }

            tick(&mut self.state, &self.input);
            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.quit = false;
        }
    }

    fn refresh_title(&self) {
        let Some(window) = &self.window else { return };
        let title = match (self.state.phase, self.frozen) {
            (_, true) => format!("{WINDOW_TITLE} [frozen]"),
            (GamePhase::Paused, _) => format!("{WINDOW_TITLE} [paused]"),
            _ => WINDOW_TITLE.to_string(),
        };
        window.set_title(&title);
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = match self.last_time {
            Some(last) => now.duration_since(last).as_secs_f32(),
            None => SIM_DT,
        };
        self.last_time = Some(now);

        self.pump_sim(dt);
        self.refresh_title();

        let vertices = shapes::scene(&self.state, self.debug);
        if let Some(render_state) = &mut self.render_state {
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = render_state.size;
                    render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, stopping");
                    self.state.phase = GamePhase::GameOver;
                }
                Err(err) => log::warn!("Render error: {:?}", err),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("Failed to initialize graphics: {}", err);
            self.fatal = Some(err);
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
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.handle_key(code, state == ElementState::Pressed, repeat);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if self.state.phase == GamePhase::GameOver {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
