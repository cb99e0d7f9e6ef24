mod analytics;
mod camera;
mod config;
mod error;
mod graphics;
mod math;
mod mesh;
mod oscillator;
mod pool;
mod projectile;
mod random;
mod state;
mod streak;
mod terminal;
mod timer;
mod title;
mod vertex;
mod widget;

use crate::analytics::LogSink;
use crate::config::Config;
use crate::error::SceneError;
use crate::graphics::PixelBuffer;
use crate::random::{RandomSource, SeededRandom};
use crate::state::{SceneState, Surface};
use crate::terminal::TerminalSession;
use crate::title::Marquee;
use crate::widget::{Flow, SceneWidget};
use clap::Parser;
use crossterm::{event, execute, queue};
use log::info;
use std::thread;
use std::time::{Duration, Instant};

/// Main function
fn main() -> Result<(), SceneError> {
    env_logger::init();
    let config = Config::parse();

    let mut session = TerminalSession::enter()?;
    run(&config, &mut session)
}

/// Runs the frame loop until the user quits
fn run(config: &Config, session: &mut TerminalSession) -> Result<(), SceneError> {
    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => Box::new(SeededRandom::from_seed(seed)),
        None => Box::new(SeededRandom::from_entropy()),
    };
    let analytics = Box::new(LogSink::new(config.analytics_id.clone()));
    let mut scene = SceneState::new(&config.scene(), rng, analytics);

    let surface = termsize::get().and_then(|size| Surface::new(size.cols, size.rows));
    scene.set_surface(surface);
    let mut buffer = match surface {
        Some(s) => PixelBuffer::for_cells(s.columns, s.rows),
        None => PixelBuffer::for_cells(0, 0),
    };
    let mut widget = SceneWidget::new(config.debug);

    let started = Instant::now();
    let mut marquee = Marquee::new(&config.title, Duration::ZERO);
    if config.no_marquee {
        marquee.stop();
    }
    execute!(session.out(), crossterm::terminal::SetTitle(&config.title))?;

    let frame_budget = config.frame_duration();
    let mut last_frame = Instant::now();
    info!("scene started, {:?} per frame", frame_budget);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            if widget.event(&event::read()?, &mut scene) == Flow::Quit {
                scene.teardown();
                marquee.stop();
                info!("quit after {:?} of scene time", scene.clock());
                return Ok(());
            }
        }

        let delta = frame_start.duration_since(last_frame);
        last_frame = frame_start;
        if !widget.paused() {
            scene.advance(delta);
        }

        if let Some(title) = marquee.poll(started.elapsed()) {
            queue!(session.out(), crossterm::terminal::SetTitle(title))?;
        }

        widget.paint(&scene, &mut buffer);
        widget.present(&scene, &buffer, session.out())?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}
