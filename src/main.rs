mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spaceships::config::GameConfig;
use spaceships::game::{GameSession, GameStatus, InputIntent};

use display::{AssetCache, TerminalSurface};

/// A key counts as held if its last press/repeat event arrived within this
/// many frames.  Covers terminals that never send key-release events: OS
/// key repeat runs at 15 Hz or more, so 8 frames at 60 FPS (≈133 ms) is
/// always refreshed before it expires.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "spaceships", about = "Vertical space shooter for the terminal")]
struct Cli {
    /// JSON file with game tunables; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random generator (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs.  RUST_LOG sets the filter, `warn` by default.
    #[arg(long, default_value = "spaceships.log")]
    log_file: PathBuf,

    /// Never ring the terminal bell.
    #[arg(long)]
    mute: bool,
}

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: every press/repeat event records the frame it was seen in;
/// each frame the keys still within `HOLD_WINDOW` become the frame's
/// `InputIntent`.  Keyboard-enhancement terminals also send releases,
/// which drop the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    assets: &mut AssetCache,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame_budget = session.config.frame_duration();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut intent = InputIntent::default();
        let mut restart = false;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => intent.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            intent.quit = true
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }
        if intent.quit {
            info!(score = session.score, "quit");
            return Ok(());
        }

        intent.move_up = any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
        intent.move_down = any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
        intent.move_left = any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        intent.move_right = any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        intent.fire = is_held(&key_frame, &KeyCode::Char(' '), frame);

        match session.status {
            GameStatus::Playing => {
                for event in session.tick(&intent, rng) {
                    assets.play_sound(event.sound());
                }
            }
            GameStatus::GameOver if restart => session.restart(),
            GameStatus::GameOver => {}
        }

        let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
        {
            let mut surface = TerminalSurface::new(
                assets,
                cols,
                rows,
                session.config.screen_width,
                session.config.screen_height,
            );
            session.render(&mut surface);
            surface.present(out, session)?;
        }
        assets.ring(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

fn play<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    assets: &mut AssetCache,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    game_loop(out, session, assets, rng, rx)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => 0,
        Err(err) => {
            println!("{err:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut assets = AssetCache::load(cli.mute);
    let mut session = GameSession::new(config, &mut rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;

    // Ask for key-release events; terminals without the kitty protocol
    // refuse and we fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();
    if !keyboard_enhanced {
        info!("keyboard enhancement unavailable, using hold window");
    }

    // Blocking event reads get their own thread so the frame loop never waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = play(&mut out, &mut session, &mut assets, &mut rng, &rx);

    // Always restore the terminal, even when the game loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    if let Err(err) = terminal::disable_raw_mode() {
        warn!(%err, "failed to restore terminal");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_go_to_the_default_file_without_flags() {
        let cli = Cli::try_parse_from(["spaceships"]).unwrap();
        assert_eq!(cli.log_file, PathBuf::from("spaceships.log"));
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.mute);
    }

    #[test]
    fn log_file_flag_overrides_the_default() {
        let cli = Cli::try_parse_from(["spaceships", "--log-file", "run.log", "--seed", "9"]).unwrap();
        assert_eq!(cli.log_file, PathBuf::from("run.log"));
        assert_eq!(cli.seed, Some(9));
    }
}
