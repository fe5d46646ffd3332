use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use balloon_shooter::compute::{init_session, tick};
use balloon_shooter::config::GameConfig;
use balloon_shooter::display::{self, Viewport};
use balloon_shooter::input::KeyTracker;
use balloon_shooter::GameError;

const LOG_FILE: &str = "balloon_shooter.log";

/// The game owns the screen, so logs go to a file and only when `RUST_LOG`
/// asks for them.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let path = std::env::temp_dir().join(LOG_FILE);
    if let Ok(file) = File::create(&path) {
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the quit control or Ctrl+C.  The frame in progress always
/// completes; quit is only checked at the top of an iteration.
fn game_loop<W: Write>(
    out: &mut W,
    config: GameConfig,
    view: &Viewport,
    rx: &mpsc::Receiver<Event>,
    release_events: bool,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let frame_budget = Duration::from_secs_f64(1.0 / config.fps as f64);

    let mut state = init_session(config, &mut rng)?;
    let mut keys = if release_events {
        KeyTracker::with_release_events()
    } else {
        KeyTracker::new()
    };
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            keys.record(&ev, frame);
        }

        if keys.close_requested() || state.quit_requested {
            log::info!(
                "quit on tick {} with {} missed shots",
                state.tick,
                state.player.missed_shots
            );
            return Ok(());
        }

        state = tick(&state, &keys.snapshot(frame), &mut rng);
        display::render(out, &state, view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();

    let config = GameConfig::default();
    config.validate()?;
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows)?;
    log::info!("starting on a {}x{} terminal with {:?}", cols, rows, config);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without the kitty protocol fall
    // back to hold-window expiry.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("key release events: {}", keyboard_enhanced);

    // Dedicated thread for blocking event reads so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, config, &view, &rx, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("session ended with error: {}", e);
    }
    result
}
