use std::fs::File;
use std::io::{stdout, BufWriter};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use env_logger::{Env, Target};
use log::{error, info};
use rand::thread_rng;

use side_shooter::config::GameConfig;
use side_shooter::display::{TerminalSurface, TITLE};
use side_shooter::driver::{run, Clock, InputSource, Outcome};
use side_shooter::error::GameError;
use side_shooter::flow::MenuKey;
use side_shooter::input::{menu_event, FrameInput, KeyTracker};

// ── Input ────────────────────────────────────────────────────────────────────

/// Reads crossterm events on the game thread.  The menu blocks on
/// `event::read`; the running game drains whatever is pending each frame.
struct TerminalInput {
    tracker: KeyTracker,
}

impl InputSource for TerminalInput {
    fn next_menu_key(&mut self) -> Result<MenuKey, GameError> {
        loop {
            if let Some(key) = menu_event(&event::read()?) {
                return Ok(key);
            }
        }
    }

    fn poll_frame(&mut self) -> Result<FrameInput, GameError> {
        self.tracker.begin_frame();
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                quit |= self.tracker.record(&key);
            }
        }
        Ok(FrameInput {
            quit,
            keys: self.tracker.snapshot(),
        })
    }
}

// ── Frame pacing ─────────────────────────────────────────────────────────────

struct FrameClock {
    frame: Duration,
    frame_start: Instant,
}

impl FrameClock {
    fn new(frame: Duration) -> Self {
        FrameClock {
            frame,
            frame_start: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ── Logging ──────────────────────────────────────────────────────────────────

/// The terminal belongs to the game while it runs, so logs go to a file
/// when one is configured and stay quiet on stderr otherwise.
fn init_logging(config: &GameConfig) -> std::io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
        }
    }
    Ok(())
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config_path = GameConfig::locate();
    let config = GameConfig::load(config_path.as_deref())?;
    init_logging(&config)?;

    match &config_path {
        Some(path) => info!("loaded config from {}", path.display()),
        None => info!("no config file found, using defaults"),
    }
    info!(
        "starting {} on a {}x{} playfield at {} FPS",
        TITLE, config.width, config.height, config.frame_rate
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = play(&mut out, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(Outcome::GameOver { score }) => {
            println!("GAME OVER! Final Score: {}", score);
            Ok(())
        }
        Ok(Outcome::Quit) => Ok(()),
        Err(e) => {
            error!("game aborted: {}", e);
            Err(e)
        }
    }
}

fn play(out: &mut BufWriter<std::io::Stdout>, config: &GameConfig) -> Result<Outcome, GameError> {
    let mut surface = TerminalSurface::new(out, config.width, config.height)?;
    let mut input = TerminalInput {
        tracker: KeyTracker::new(),
    };
    let mut clock = FrameClock::new(config.frame_duration());
    let mut rng = thread_rng();
    run(&mut surface, &mut input, &mut clock, &mut rng, config)
}
