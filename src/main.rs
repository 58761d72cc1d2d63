mod app;
mod canvas;
mod config;
mod gpu;
mod simulation;
mod ui;
mod viewport;

use winit::event_loop::EventLoop;

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    let mut app = app::App::new();
    event_loop.run_app(&mut app)
}
