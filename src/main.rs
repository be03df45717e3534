//! Conway's Game of Life on a toroidal grid.
//!
//! Click a cell to toggle it, drag to paint cells in the state of the first
//! one, then play the simulation at a fixed rate or step it one generation at
//! a time.

mod app;

use anyhow::Context;
use torus_life::config::SimConfig;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new().context("Couldn't initialize the windowing system")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(SimConfig::default());
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated abnormally")?;

    app.finish()
}
