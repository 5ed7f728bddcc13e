//! Terminal shaft runner (default binary).
//!
//! Owns the terminal, the scene renderer and the animator, and drives a
//! `GameSession` with real frame deltas. Settings come from a JSON file with
//! command line overrides.

mod logging;

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::LevelFilter;

use threetris::core::{BlockSet, GameSession, Settings, TweenAnimator};
use threetris::input::{handle_key_event, should_quit, Control, KeyAction};
use threetris::term::{FrameBuffer, GameView, HudState, Scene, Terminal, ViewState, Viewport};
use threetris::types::FRAME_MS;

#[derive(Debug, Parser)]
#[command(name = "threetris", version, about = "Falling blocks in a 3D shaft")]
struct Args {
    /// Settings file (JSON); missing files fall back to defaults
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Shaft size along x
    #[arg(long)]
    width: Option<i32>,
    /// Shaft size along z
    #[arg(long)]
    depth: Option<i32>,
    /// Shaft size along y (layers)
    #[arg(long)]
    height: Option<i32>,
    /// Seconds per gravity step
    #[arg(long)]
    speed: Option<f32>,
    /// Seconds per piece animation
    #[arg(long)]
    animation: Option<f32>,
    /// flat, basic or extended
    #[arg(long, value_parser = parse_block_set)]
    block_set: Option<BlockSet>,
    /// Seed for the shape generator (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,
    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save: bool,
}

fn parse_block_set(s: &str) -> Result<BlockSet, String> {
    BlockSet::from_str(s).ok_or_else(|| format!("unknown block set '{s}'"))
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load_or_default(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(width) = self.width {
            settings.shaft_size_x = width;
        }
        if let Some(depth) = self.depth {
            settings.shaft_size_z = depth;
        }
        if let Some(height) = self.height {
            settings.shaft_size_y = height;
        }
        if let Some(speed) = self.speed {
            settings.falling_speed = speed;
        }
        if let Some(animation) = self.animation {
            settings.animation_duration = animation;
        }
        if let Some(block_set) = self.block_set {
            settings.block_set = block_set;
        }
        settings.validate().context("invalid settings")?;

        if self.save {
            let Some(path) = &self.settings else {
                bail!("--save needs --settings <FILE>");
            };
            settings
                .save(path)
                .with_context(|| format!("saving settings to {}", path.display()))?;
        }
        Ok(settings)
    }

    fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        logging::init(path, args.log_level)?;
    }
    let settings = args.settings()?;
    let seed = args.seed();
    log::info!("seed {seed}");

    let mut term = Terminal::new();
    term.enter()?;

    let result = run(&mut term, &settings, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut Terminal, settings: &Settings, seed: u32) -> Result<()> {
    let hud = HudState::shared();
    let animator = TweenAnimator::new(settings.animation_duration);
    let mut session = GameSession::new(settings.clone(), Scene::new(), animator).with_seed(seed);
    session.register(HudState::listener(&hud));
    session.start(settings)?;

    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut frame = FrameBuffer::new(w, h);
    let mut message: Option<String> = None;

    let frame_time = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        {
            let hud = hud.borrow();
            let state = ViewState {
                shaft: session.shaft(),
                scene: session.renderer(),
                hud: &hud,
                message: message.as_deref(),
            };
            view.render_into(&state, Viewport::new(w, h), &mut frame);
        }
        term.present(&mut frame)?;

        // Input with timeout until the next frame.
        let timeout = frame_time.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(KeyAction::Game(command)) => session.enqueue(command),
                        Some(KeyAction::Control(Control::TogglePause)) => {
                            if !session.pause() {
                                session.resume();
                            }
                        }
                        Some(KeyAction::Control(Control::Stop)) => session.stop(false),
                        Some(KeyAction::Control(Control::Restart)) => {
                            message = None;
                            session.start(settings)?;
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Advance.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame_time {
            last_frame = Instant::now();
            if let Err(err) = session.update(elapsed.as_secs_f32()) {
                log::error!("session aborted: {err}");
                message = Some(format!("error: {err}"));
                session.stop(false);
            }
        }
    }
}
