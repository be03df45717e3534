use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rand::rngs::ThreadRng;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use torus_life::config::{SimConfig, CANVAS_HEIGHT, CANVAS_WIDTH, WINDOW_TITLE};
use torus_life::gpu::{build_frame, GpuContext, Letterbox, RectBuffers, RenderPipeline, ShapeBatch};
use torus_life::simulation::{ButtonMask, Command, Flow, InputEvent, PointerButton, SimulationState};

/// Window and GPU resources, created once the event loop is running
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    rect_buffers: RectBuffers,
    render_pipeline: RenderPipeline,
    batch: ShapeBatch,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop, config: &SimConfig, cell_count: usize) -> anyhow::Result<Self> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Couldn't create window")?,
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        // Dead pass draws every cell, the live overlay at most every cell again
        let capacity = cell_count * 2;
        let rect_buffers = RectBuffers::new(
            &gpu.device,
            &gpu.queue,
            capacity,
            (config.canvas_width, config.canvas_height),
        );
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format(), &rect_buffers.params_buffer);
        let batch = ShapeBatch::new(capacity, gpu.is_srgb());

        Ok(Self {
            window,
            gpu,
            rect_buffers,
            render_pipeline,
            batch,
        })
    }
}

/// Pointer position (canvas coordinates) and held buttons
#[derive(Default)]
struct PointerState {
    position: Option<(f32, f32)>,
    buttons: ButtonMask,
}

/// Application state
pub struct App {
    config: SimConfig,
    graphics: Option<Graphics>,
    state: SimulationState,
    pointer: PointerState,
    rng: ThreadRng,
    fps_counter: FpsCounter,
    startup_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: SimulationState::new(&config, Instant::now()),
            config,
            graphics: None,
            pointer: PointerState::default(),
            rng: rand::thread_rng(),
            fps_counter: FpsCounter::new(),
            startup_error: None,
        }
    }

    /// Outcome of the run once the event loop has returned
    pub fn finish(self) -> anyhow::Result<()> {
        match self.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn letterbox(&self) -> Letterbox {
        let (width, height) = self
            .graphics
            .as_ref()
            .map(|gfx| gfx.gpu.size())
            .unwrap_or((CANVAS_WIDTH, CANVAS_HEIGHT));
        Letterbox::new(
            self.config.canvas_width,
            self.config.canvas_height,
            width as f32,
            height as f32,
        )
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        if self.state.handle_event(event, &mut self.rng) == Flow::Quit {
            log::info!("Quit requested, exiting...");
            event_loop.exit();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode, repeat: bool) {
        let event = match key_code {
            KeyCode::Escape => InputEvent::Quit,
            KeyCode::KeyP if !repeat => InputEvent::Key(Command::TogglePlay),
            // Holding "." keeps stepping
            KeyCode::Period => InputEvent::Key(Command::StepOnce),
            KeyCode::KeyR if !repeat => InputEvent::Key(Command::Reset),
            KeyCode::KeyN if !repeat => InputEvent::Key(Command::Randomize),
            _ => return,
        };
        self.dispatch(event_loop, event);
    }

    fn handle_mouse_button(&mut self, event_loop: &ActiveEventLoop, state: ElementState, button: MouseButton) {
        let button = match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            _ => return,
        };

        let pressed = state.is_pressed();
        self.pointer.buttons.set(button, pressed);

        // Releases only update the mask; the next motion ends the drag
        if let (true, Some((x, y))) = (pressed, self.pointer.position) {
            self.dispatch(event_loop, InputEvent::MouseDown { x, y, button });
        }
    }

    fn handle_cursor_move(&mut self, event_loop: &ActiveEventLoop, position: winit::dpi::PhysicalPosition<f64>) {
        let (x, y) = self.letterbox().to_canvas(position.x as f32, position.y as f32);
        self.pointer.position = Some((x, y));
        let buttons = self.pointer.buttons;
        self.dispatch(event_loop, InputEvent::MouseMove { x, y, buttons });
    }

    fn redraw(&mut self) {
        self.state.update(Instant::now());

        let letterbox = self.letterbox();
        let Some(gfx) = self.graphics.as_mut() else {
            return;
        };

        build_frame(&self.state.grid, &mut gfx.batch);
        gfx.rect_buffers.upload(&gfx.gpu.queue, gfx.batch.instances());

        let output = match gfx.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                gfx.gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gfx
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        gfx.render_pipeline.draw(
            &mut encoder,
            &view,
            &gfx.rect_buffers.instance_buffer,
            gfx.rect_buffers.instance_count(),
            &letterbox,
        );

        gfx.gpu.queue.submit(std::iter::once(encoder.finish()));
        gfx.window.pre_present_notify();
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            let stats = self.state.stats;
            let mode = if self.state.clock.is_playing() { "Playing" } else { "Paused" };
            gfx.window.set_title(&format!(
                "{} - Gen {} - Pop {} - {:.0} FPS - {}",
                WINDOW_TITLE,
                stats.generation,
                self.state.grid.population(),
                fps,
                mode
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        log::info!("Initializing Game of Life...");
        log::info!(
            "Grid size: {}x{}, {} steps/s",
            self.config.grid_width,
            self.config.grid_height,
            self.config.steps_per_second
        );

        match Graphics::new(event_loop, &self.config, self.state.grid.cell_count()) {
            Ok(graphics) => {
                log::info!("Initialization complete!");
                log::info!("Controls:");
                log::info!("  Left click: Toggle cell, drag to paint");
                log::info!("  P: Play/pause");
                log::info!("  .: Step one generation");
                log::info!("  R: Reset grid");
                log::info!("  N: Random soup");
                log::info!("  Escape: Quit");
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => {
                log::error!("{:#}", err);
                self.startup_error = Some(err);
                event_loop.exit();
            }
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
                self.dispatch(event_loop, InputEvent::Quit);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        self.handle_key(event_loop, key_code, event.repeat);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(event_loop, state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_move(event_loop, position);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gfx) = &mut self.graphics {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    gfx.gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                // Request another frame immediately
                if let Some(gfx) = &self.graphics {
                    gfx.window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
