mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use space_shooter::assets::{AssetName, Assets, Rgb};
use space_shooter::config::{FPS, WIDTH};
use space_shooter::platform::{Clock, FrameClock, InputEvent, InputSource, Renderer, TextStyle};
use space_shooter::sim::{run_playthrough, Simulation, Termination};

use display::TerminalRenderer;
use input::TerminalInput;

/// Optional directory whose `<name>.txt` files replace the built-in art.
const ASSETS_ENV: &str = "SPACE_SHOOTER_ASSETS";

/// Optional log file; the game owns the screen, so logs can't go to stderr.
const LOG_ENV: &str = "SPACE_SHOOTER_LOG";

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    let log_file = std::env::var_os(LOG_ENV).map(PathBuf::from);

    let mut builder = env_logger::Builder::new();
    let default_level = if log_file.is_some() {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    builder.filter_level(default_level).parse_default_env();

    if let Some(path) = log_file {
        let file = File::create(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

/// Top-level program flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppState {
    Menu,
    Playing,
    Exiting,
}

fn draw_menu<R: Renderer>(out: &mut R, assets: &Assets) -> std::io::Result<()> {
    const PURPLE: Rgb = Rgb(127, 0, 255);

    out.blit(assets.get(AssetName::Background), 0, 0)?;

    let title = "SPACE SHOOTER";
    let x = WIDTH / 2 - out.text_width(title, TextStyle::Title) / 2;
    out.draw_text(title, x, 450, TextStyle::Title, PURPLE)?;

    let prompt = "click or press Enter to start";
    let x = WIDTH / 2 - out.text_width(prompt, TextStyle::Caption) / 2;
    out.draw_text(prompt, x, 525, TextStyle::Caption, PURPLE)?;

    out.present()
}

/// One menu frame: draw, then react to input.
fn menu_step<R: Renderer, I: InputSource>(out: &mut R, input: &mut I, assets: &Assets) -> std::io::Result<AppState> {
    draw_menu(out, assets)?;
    let mut next = AppState::Menu;
    for event in input.poll_events() {
        match event {
            InputEvent::Close => return Ok(AppState::Exiting),
            InputEvent::MouseDown | InputEvent::Confirm => next = AppState::Playing,
        }
    }
    Ok(next)
}

fn run<W: Write>(out: &mut TerminalRenderer<W>, input: &mut TerminalInput, assets: &Assets) -> std::io::Result<()> {
    let mut clock = FrameClock::new(FPS);
    let mut state = AppState::Menu;

    while state != AppState::Exiting {
        state = match state {
            AppState::Menu => {
                clock.wait();
                menu_step(out, input, assets)?
            }
            AppState::Playing => {
                let mut sim = Simulation::new(assets.clone(), thread_rng());
                match run_playthrough(&mut sim, input, out, &mut clock)? {
                    Termination::WindowClosed => AppState::Exiting,
                    Termination::Defeated => AppState::Menu,
                }
            }
            AppState::Exiting => AppState::Exiting,
        };
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;

    // Fatal before anything touches the terminal.
    let asset_dir = std::env::var_os(ASSETS_ENV).map(PathBuf::from);
    let assets = Assets::load(asset_dir.as_deref()).context("failed to load game assets")?;
    log::info!("assets loaded, starting at {} fps", FPS);

    let mut raw = stdout();
    terminal::enable_raw_mode()?;
    raw.execute(terminal::EnterAlternateScreen)?;
    raw.execute(cursor::Hide)?;
    raw.execute(EnableMouseCapture)?;

    // Ask for key-release events; terminals without the kitty protocol refuse
    // and fall back to press + auto-repeat.
    let keyboard_enhanced = raw
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = TerminalRenderer::new(BufWriter::new(stdout())).and_then(|mut out| {
        let mut input = TerminalInput::new(rx);
        run(&mut out, &mut input, &assets)
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = raw.execute(PopKeyboardEnhancementFlags);
    }
    let _ = raw.execute(DisableMouseCapture);
    let _ = raw.execute(cursor::Show);
    let _ = raw.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")?;
    log::info!("bye");
    Ok(())
}
