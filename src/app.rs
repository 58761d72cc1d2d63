use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::canvas::Canvas;
use crate::config;
use crate::gpu::{BlitPipeline, GpuContext};
use crate::simulation::{Cell, Engine, Grid};
use crate::ui::{UiAction, UiLayout};
use crate::viewport::{self, Camera};

/// Overall run mode. The simulation only advances on the step clock
/// while Running; single-stepping is a Paused-only action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    Paused,
    Running,
}

impl RunMode {
    fn toggled(self) -> Self {
        match self {
            RunMode::Paused => RunMode::Running,
            RunMode::Running => RunMode::Paused,
        }
    }
}

/// Frame-time accumulator for fixed-interval simulation steps.
///
/// Each triggered step consumes exactly one interval, keeping the
/// carry-over so cumulative boundary crossings survive uneven frame
/// times. Mode toggles and manual single-steps never touch it.
struct StepClock {
    interval: f32,
    accum: f32,
}

impl StepClock {
    fn new(interval: f32) -> Self {
        Self {
            interval,
            accum: 0.0,
        }
    }

    /// Feed one frame's elapsed time; returns the number of steps due.
    fn advance(&mut self, dt: f32) -> u32 {
        self.accum += dt;
        let mut due = 0;
        while self.accum >= self.interval {
            self.accum -= self.interval;
            due += 1;
        }
        due
    }
}

/// Pointer state accumulated from window events, read once per frame.
#[derive(Default)]
struct InputState {
    cursor: (f32, f32),
    left_down: bool,
    right_down: bool,
    wheel: f32,
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    blit: Option<BlitPipeline>,
    canvas: Canvas,

    grid: Grid,
    engine: Engine,
    camera: Camera,
    ui: UiLayout,

    mode: RunMode,
    clock: StepClock,
    selected: Cell,
    input: InputState,
    last_frame: Instant,
}

impl App {
    pub fn new() -> Self {
        let rows = (config::WINDOW_HEIGHT as f32 / config::DEFAULT_CELL_SIZE) as usize;
        let cols = (config::WINDOW_WIDTH as f32 / config::DEFAULT_CELL_SIZE) as usize;

        Self {
            window: None,
            gpu: None,
            blit: None,
            canvas: Canvas::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT),
            grid: Grid::new(rows, cols),
            engine: Engine::new(),
            camera: Camera::new(config::DEFAULT_CELL_SIZE),
            ui: UiLayout::new(config::WINDOW_WIDTH as f32),
            mode: RunMode::Paused,
            clock: StepClock::new(config::REFRESH_INTERVAL),
            selected: Cell::Empty,
            input: InputState::default(),
            last_frame: Instant::now(),
        }
    }

    /// One frame: consume input, apply edits, maybe simulate, expand the
    /// grid to the view, then render. The growth pass completes before
    /// anything reads the grid for drawing.
    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().clamp(0.0, 0.25);
        self.last_frame = now;

        // Wheel zoom, anchored at the cursor.
        if self.input.wheel != 0.0 {
            let factor = config::ZOOM_STEP.powf(self.input.wheel);
            let new_size = self.camera.cell_size * factor;
            self.camera
                .zoom_around(&mut self.grid, self.input.cursor, new_size);
            self.input.wheel = 0.0;
        }

        // Painting: held primary button, unless over a control region.
        let (px, py) = self.input.cursor;
        if self.input.left_down && !self.ui.covers(px, py) {
            if let Some((r, c)) = self.camera.hit_cell(&self.grid, self.input.cursor) {
                self.grid.set(r, c, self.selected);
            }
        }

        if self.mode == RunMode::Running {
            for _ in 0..self.clock.advance(dt) {
                self.engine.step(&mut self.grid);
            }
        }

        viewport::grow_to_fit(
            &mut self.grid,
            &self.camera,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        );

        self.rasterize();
        self.present();
    }

    /// Draw the frame into the CPU canvas: background, visible cells,
    /// hover outline, controls.
    fn rasterize(&mut self) {
        self.canvas.clear(config::BACKGROUND_COLOR);

        let (rows, cols) = self.camera.visible_cells(
            &self.grid,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        );
        for r in rows {
            for c in cols.clone() {
                let rect = self.camera.cell_rect(&self.grid, (r as i64, c as i64));
                self.canvas.fill_rect(rect, self.grid.get(r, c).color());
                self.canvas.stroke_rect(rect, config::GRID_LINE_COLOR);
            }
        }

        // Hover outline at the cursor's cell, in or out of bounds.
        let hover = self.camera.cell_under(&self.grid, self.input.cursor);
        let rect = self.camera.cell_rect(&self.grid, hover);
        self.canvas.stroke_rect(rect, config::HIGHLIGHT_COLOR);

        self.ui
            .draw(&mut self.canvas, self.mode == RunMode::Running, self.selected);
    }

    fn present(&mut self) {
        let (Some(gpu), Some(blit)) = (self.gpu.as_ref(), self.blit.as_mut()) else {
            return;
        };

        blit.upload(&gpu.queue, &self.canvas);

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        blit.draw(&mut encoder, &view);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn step_once(&mut self) {
        if self.mode == RunMode::Paused {
            self.engine.step(&mut self.grid);
        }
    }

    fn handle_ui(&mut self, action: UiAction) {
        match action {
            UiAction::TogglePlay => {
                self.mode = self.mode.toggled();
                log::info!("{:?}", self.mode);
            }
            UiAction::StepOnce => self.step_once(),
            UiAction::Select(cell) => self.selected = cell,
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                self.mode = self.mode.toggled();
                log::info!("{:?}", self.mode);
            }
            KeyCode::KeyN => self.step_once(),
            KeyCode::KeyC => self.grid.clear(),

            KeyCode::Digit1 | KeyCode::Numpad1 => self.selected = Cell::Empty,
            KeyCode::Digit2 | KeyCode::Numpad2 => self.selected = Cell::Conductor,
            KeyCode::Digit3 | KeyCode::Numpad3 => self.selected = Cell::ElectronHead,
            KeyCode::Digit4 | KeyCode::Numpad4 => self.selected = Cell::ElectronTail,

            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!(
            "Starting Wireworld, grid {}x{}",
            self.grid.rows(),
            self.grid.cols()
        );

        let window_attrs = Window::default_attributes()
            .with_title("Wireworld Simulator")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config::WINDOW_WIDTH,
                config::WINDOW_HEIGHT,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        let gpu = pollster::block_on(GpuContext::new(window.clone()));
        let blit = BlitPipeline::new(&gpu.device, gpu.format(), gpu.config.width, gpu.config.height);
        self.canvas.resize(gpu.config.width, gpu.config.height);
        self.ui = UiLayout::new(gpu.config.width as f32);

        log::info!("Controls:");
        log::info!("  Space / play button: toggle run");
        log::info!("  N / step button: single step while paused");
        log::info!("  C: clear grid");
        log::info!("  1-4: select paint state");
        log::info!("  Left mouse: paint, right mouse: pan, wheel: zoom");
        log::info!("  Escape: quit");

        self.last_frame = Instant::now();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.blit = Some(blit);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() && !event.repeat {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                    if let Some(blit) = &mut self.blit {
                        blit.resize(&gpu.device, new_size.width, new_size.height);
                    }
                }
                self.canvas.resize(new_size.width, new_size.height);
                self.ui = UiLayout::new(new_size.width as f32);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let cursor = (position.x as f32, position.y as f32);
                if self.input.right_down {
                    let dx = cursor.0 - self.input.cursor.0;
                    let dy = cursor.1 - self.input.cursor.1;
                    self.camera.pan(dx, dy);
                }
                self.input.cursor = cursor;
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let down = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => {
                        let (px, py) = self.input.cursor;
                        if down {
                            if let Some(action) = self.ui.hit(px, py) {
                                self.handle_ui(action);
                            }
                        }
                        self.input.left_down = down;
                    }
                    MouseButton::Right => self.input.right_down = down,
                    _ => {}
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.input.wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
            }

            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_honors_cumulative_interval_crossings() {
        // Interval 0.2s, three frames of 0.15s: crossings at 0.2 and
        // 0.4 cumulative, so exactly two steps, not three.
        let mut clock = StepClock::new(0.2);
        let mut steps = 0;
        for _ in 0..3 {
            steps += clock.advance(0.15);
        }
        assert_eq!(steps, 2);
    }

    #[test]
    fn clock_keeps_carry_over_between_frames() {
        let mut clock = StepClock::new(0.2);
        assert_eq!(clock.advance(0.3), 1);
        // 0.1s of carry plus 0.1s reaches the next boundary.
        assert_eq!(clock.advance(0.1), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn clock_catches_up_after_a_long_frame() {
        let mut clock = StepClock::new(0.2);
        assert_eq!(clock.advance(0.65), 3);
        assert_eq!(clock.advance(0.15), 1);
    }

    #[test]
    fn run_mode_toggle_is_unconditional() {
        assert_eq!(RunMode::Paused.toggled(), RunMode::Running);
        assert_eq!(RunMode::Running.toggled(), RunMode::Paused);
    }

    #[test]
    fn single_step_only_applies_while_paused() {
        let mut app = App::new();
        app.grid.set(5, 5, Cell::ElectronHead);

        app.mode = RunMode::Running;
        app.step_once();
        assert_eq!(app.grid.get(5, 5), Cell::ElectronHead);

        app.mode = RunMode::Paused;
        app.step_once();
        assert_eq!(app.grid.get(5, 5), Cell::ElectronTail);
        // The accumulator is untouched by manual steps.
        assert_eq!(app.clock.accum, 0.0);
    }

    #[test]
    fn startup_grid_fills_the_default_window() {
        let app = App::new();
        assert_eq!(app.grid.rows(), 23);
        assert_eq!(app.grid.cols(), 40);
        assert_eq!(app.mode, RunMode::Paused);
    }
}
