//! Terminal Makaton Match runner (default binary).
//!
//! crossterm for input, the framebuffer renderer from the term crate for
//! output, and a fixed 16 ms tick driving the controller.

use std::env;
use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use makaton_match::config::{catalog_for, parse_args, CliArgs, LaunchConfig, USAGE};
use makaton_match::core::{GameState, RenderCapability};
use makaton_match::engine::Session;
use makaton_match::input::{handle_key_event, HoldTracker, KeyCommand};
use makaton_match::player::CaptionPlayer;
use makaton_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use makaton_match::types::{DeviceClass, Orientation, Point, Rect, TICK_MS};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }
    init_logging()?;
    let config = LaunchConfig::load(&cli)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &cli, config);

    // Always try to restore terminal state.
    let _ = term.leave();
    result
}

/// Logs go to `MAKATON_LOG` when set; stderr is hidden behind the
/// alternate screen otherwise.
fn init_logging() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(path) = env::var("MAKATON_LOG") {
        let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Pointer drag in progress, in layout pixels.
struct MouseDrag {
    last: Point,
}

fn run(term: &mut TerminalRenderer, cli: &CliArgs, config: LaunchConfig) -> Result<()> {
    let view = GameView::new(catalog_for(&config.words));
    let LaunchConfig {
        settings,
        words,
        kind,
        seed,
    } = config;
    log::info!(
        "starting {} with {} words, {} switches",
        kind.as_str(),
        words.len(),
        settings.switch_count
    );
    if cli.words.is_some() && words.is_empty() {
        log::warn!("word list is empty");
    }

    let game = GameState::new(words, settings, kind, seed, CaptionPlayer::new())
        .with_capability(RenderCapability::Renders2D);
    let mut session = Session::new(game);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    apply_viewport(&mut session, viewport);
    session.game_mut().initialize_game(0);

    let mut fb = FrameBuffer::new(w, h);
    let mut hold = HoldTracker::new();
    let mut mouse: Option<MouseDrag> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let snap = session.snapshot();
        let caption = session.game().player().caption();
        view.render_into(&snap, caption, viewport, &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(&mut session, &mut hold, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(m) => handle_mouse(&mut session, &mut mouse, viewport, m),
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    apply_viewport(&mut session, viewport);
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(held_ms) = hold.update(TICK_MS) {
                if session.game_mut().long_press_lock(held_ms) {
                    log::info!("lock toggled: locked={}", session.game().is_locked());
                }
            }
            if let Some(ticket) = session.game_mut().player_mut().update(TICK_MS) {
                session.game_mut().playback_finished(ticket);
            }
            session.tick(TICK_MS);
        }
    }
}

fn apply_viewport(session: &mut Session<CaptionPlayer>, viewport: Viewport) {
    let (w, h) = viewport.play_area_px();
    session.game_mut().set_viewport(
        w,
        h,
        DeviceClass::from_size(w, h),
        Orientation::from_size(w, h),
    );
}

/// Returns true when the runner should exit.
fn handle_key(session: &mut Session<CaptionPlayer>, hold: &mut HoldTracker, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let Some(command) = handle_key_event(key, session.switches_enabled()) else {
        return false;
    };
    // Auto-repeat only matters for the lock hold.
    if key.kind == KeyEventKind::Repeat && command != KeyCommand::LockHold {
        return false;
    }

    match command {
        KeyCommand::Quit => {
            if session.game().can_exit() {
                return true;
            }
            log::debug!("exit blocked while locked");
        }
        KeyCommand::Switch(press) => {
            session.press(press);
        }
        KeyCommand::Nudge { dx, dy } => {
            let game = session.game_mut();
            if game.is_dragging() || game.drag_start() {
                game.drag_move(dx, dy);
            }
        }
        KeyCommand::Drop => {
            let game = session.game_mut();
            if let Some(center) = game.match_center() {
                game.drag_release(center);
            }
        }
        KeyCommand::Tap(index) => {
            if let Err(err) = session.tap(index) {
                log::debug!("tap {} rejected: {} ({})", index, err.code(), err.message());
            }
        }
        KeyCommand::Navigate(nav) => {
            session.game_mut().navigate(nav);
        }
        KeyCommand::LockHold => hold.press(),
    }
    false
}

fn handle_mouse(
    session: &mut Session<CaptionPlayer>,
    drag: &mut Option<MouseDrag>,
    viewport: Viewport,
    m: MouseEvent,
) {
    let Some(p) = viewport.cell_to_px(m.column, m.row) else {
        return;
    };
    match m.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let game = session.game_mut();
            let on_match_card = match (game.layout(), game.match_center()) {
                (Some(layout), Some(center)) => {
                    Rect::centered(center, layout.match_rect.size()).contains(p)
                }
                _ => false,
            };
            if on_match_card {
                if game.drag_start() {
                    *drag = Some(MouseDrag { last: p });
                }
                return;
            }
            let slot = game.layout().and_then(|l| l.slot_at(p));
            if let Some(index) = slot {
                if let Err(err) = session.tap(index) {
                    log::debug!("tap {} rejected: {}", index, err.code());
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(d) = drag.as_mut() {
                session.game_mut().drag_move(p.x - d.last.x, p.y - d.last.y);
                d.last = p;
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if drag.take().is_some() {
                session.game_mut().drag_release(p);
            }
        }
        _ => {}
    }
}
