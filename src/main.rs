//! Terminal blockfall runner.
//!
//! Drives the simulation at a fixed tick, maps keyboard and mouse input to
//! game actions, and forwards sound cues to the configured sink.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, pointer_press, should_quit};
use blockfall::term::{
    BellSink, ControlLayout, FrameBuffer, GameView, LogSink, MuteSink, SoundSink,
    TerminalRenderer, Viewport,
};
use blockfall::types::GameEvent;
use blockfall::{logging, GameConfig, SoundMode};

/// blockfall - falling-block puzzle game for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON config file (overrides BLOCKFALL_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for the piece sequence
    #[arg(short, long)]
    seed: Option<u32>,

    /// Disable sound cues
    #[arg(short, long)]
    mute: bool,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::load(self.config.as_deref(), |key| std::env::var(key).ok())
            .context("failed to load configuration")?;
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.mute {
            config.sound = SoundMode::Off;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        Ok(config)
    }
}

fn sound_sink(mode: SoundMode) -> Box<dyn SoundSink> {
    match mode {
        SoundMode::Off => Box::new(MuteSink),
        SoundMode::Bell => Box::new(BellSink::stdout()),
        SoundMode::Log => Box::new(LogSink),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;
    logging::init(config.log_file.as_deref())?;

    let seed = config.resolve_seed();
    info!(seed, sound = ?config.sound, "blockfall starting");

    let mut sink = sound_sink(config.sound);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, seed, sink.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("blockfall exiting");
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    seed: u32,
    sink: &mut dyn SoundSink,
) -> Result<()> {
    let mut game = GameState::with_timing(seed, config.timing());

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut controls = ControlLayout::new();

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb, &mut controls);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        // Held keys repeat piece commands only.
                        if key.kind == KeyEventKind::Press || action.is_piece_command() {
                            game.apply_action(action);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) =
                        pointer_press(mouse).and_then(|(col, row)| controls.action_at(col, row))
                    {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(config.tick_ms);
        }

        for event in game.take_events() {
            match event {
                GameEvent::Cue(sound) => sink.play(sound),
                GameEvent::LinesCleared { count, points } => {
                    debug!(count, points, score = game.score(), "lines cleared");
                }
                GameEvent::FinalScore(score) => info!(score, "final score"),
            }
        }
    }
}
