//! Terminal memory game runner (default binary).
//!
//! Uses crossterm for input and the custom framebuffer-based renderer
//! (no ratatui widgets/layout).

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_memory::config::AppConfig;
use tui_memory::core::{GameController, GameSnapshot, Overlay, Persistence, SystemClock};
use tui_memory::input::{handle_key_event, handle_mouse_event, should_quit, MouseTarget};
use tui_memory::store::FileStore;
use tui_memory::term::{fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_memory::types::TICK_MS;

/// Redraw interval while nothing changes (keeps the clock readout honest).
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "game loop failed");
    }
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let store = match &config.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default(),
    };
    tracing::info!(dir = %store.dir().display(), "using data dir");

    let mut game = GameController::new(
        config.difficulty(),
        config.theme(),
        config.seed(),
        Persistence::new(store),
        SystemClock::new(),
    )?;

    let view = GameView::default().with_ascii(config.ascii);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let (mut width, mut height) = crossterm::terminal::size().unwrap_or((80, 24));

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let viewport = Viewport::new(width, height);
        let is_static = game.next_transition_ms().is_none();
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&snap), is_static) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let changed = game.apply_action(action);
                        tracing::trace!(action = action.as_str(), changed, "key");
                    }
                }
                Event::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, |x, y| {
                        mouse_target(&view, &snap, viewport, x, y)
                    });
                    if let Some(action) = action {
                        let changed = game.apply_action(action);
                        tracing::trace!(action = action.as_str(), changed, "mouse");
                    }
                }
                Event::Resize(w, h) => {
                    width = w;
                    height = h;
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }

        for event in game.take_events() {
            tracing::debug!(?event, "game event");
        }
    }
}

fn mouse_target(view: &GameView, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) -> MouseTarget {
    if snap.overlay == Overlay::None {
        return view
            .hit_test(snap, viewport, x, y)
            .map_or(MouseTarget::Nothing, MouseTarget::Card);
    }
    if view.modal_contains(snap, viewport, x, y) {
        MouseTarget::Modal
    } else {
        MouseTarget::Backdrop
    }
}
