mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use grid_invaders::compute::{init_state, reinitialize, report, start, tick};
use grid_invaders::entities::{GameState, GameStatus, PlayerInput};
use grid_invaders::render::Scoreboard;
use grid_invaders::{Config, GameResult};

use display::TerminalCanvas;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many loop iterations.  Covers terminals that don't emit key-release
/// events: at the default 4 ms schedule this is ≈ 120 ms, shorter than the OS
/// key-repeat interval plus one event, so a held key never flickers off.
const HOLD_WINDOW: u64 = 30;

/// Maps each held key → the loop iteration it was last seen (press or repeat).
#[derive(Default)]
struct KeyState {
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyState {
    fn press(&mut self, code: KeyCode, iteration: u64) {
        self.last_seen.insert(normalize(code), iteration);
    }

    fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&normalize(code));
    }

    fn is_held(&self, code: KeyCode, iteration: u64) -> bool {
        self.last_seen
            .get(&code)
            .map(|&last| iteration.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Current intents for the three fixed bindings.
    fn input(&self, iteration: u64) -> PlayerInput {
        PlayerInput {
            left: self.is_held(KeyCode::Left, iteration)
                || self.is_held(KeyCode::Char('q'), iteration),
            right: self.is_held(KeyCode::Right, iteration)
                || self.is_held(KeyCode::Char('d'), iteration),
            shoot: self.is_held(KeyCode::Char(' '), iteration),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Esc
        || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

// ── Session driver ────────────────────────────────────────────────────────────

/// Owns everything the front-end needs between frames.
struct App<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    config: Config,
    canvas: TerminalCanvas,
    rng: StdRng,
    epoch: Instant,
}

enum MenuResult {
    Start,
    Quit,
}

impl<W: Write> App<W> {
    fn run(&mut self) -> GameResult<()> {
        let mut state = init_state(self.config.frame_interval());

        loop {
            match self.menu(&mut state)? {
                MenuResult::Quit => break,
                MenuResult::Start => {
                    state = start(&state, self.epoch.elapsed());
                    self.canvas.hide_menu();
                    self.canvas.show_score(state.score, state.high_score);
                    self.canvas.show_lives(state.player.lives);

                    let quit = self.game_loop(&mut state)?;
                    if quit {
                        break;
                    }
                    // Otherwise loop back to the menu
                }
            }
        }
        Ok(())
    }

    /// Block until the user starts a game or quits.
    fn menu(&mut self, state: &mut GameState) -> GameResult<MenuResult> {
        let game_over = state.status == GameStatus::GameOver;
        self.canvas
            .show_menu(state.score, state.high_score, game_over);
        self.canvas.present(&mut self.out)?;

        loop {
            match self.rx.recv() {
                Ok(Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                })) => {
                    if is_quit(code, modifiers) {
                        return Ok(MenuResult::Quit);
                    }
                    if code == KeyCode::Enter {
                        return Ok(MenuResult::Start);
                    }
                }
                Ok(Event::Resize(..)) => {
                    *state = reinitialize(state);
                    self.canvas.present(&mut self.out)?;
                }
                Ok(_) => {}
                // Input thread gone; nothing more will ever arrive
                Err(_) => return Ok(MenuResult::Quit),
            }
        }
    }

    /// Returns `true` → quit program,  `false` → back to menu.
    ///
    /// Input model: each held key records the loop iteration of its last
    /// press/repeat event.  Every iteration we check which keys are still
    /// "fresh" and hand the resulting intents to the engine, so Space and a
    /// direction can be held together.
    fn game_loop(&mut self, state: &mut GameState) -> GameResult<bool> {
        let mut keys = KeyState::default();
        let mut iteration: u64 = 0;

        loop {
            iteration += 1;

            // ── Drain all pending input events (non-blocking) ─────────────────
            while let Ok(ev) = self.rx.try_recv() {
                match ev {
                    Event::Key(KeyEvent {
                        code,
                        kind,
                        modifiers,
                        ..
                    }) => match kind {
                        KeyEventKind::Press => {
                            if is_quit(code, modifiers) {
                                return Ok(true);
                            }
                            keys.press(code, iteration);
                        }
                        KeyEventKind::Repeat => keys.press(code, iteration),
                        KeyEventKind::Release => keys.release(code),
                    },
                    Event::Resize(..) => {
                        *state = reinitialize(state);
                        self.canvas.show_score(state.score, state.high_score);
                        self.canvas.show_lives(state.player.lives);
                    }
                    _ => {}
                }
            }

            let input = keys.input(iteration);
            let (next, outcome) = tick(
                state,
                &input,
                self.epoch.elapsed(),
                &mut self.rng,
                &mut self.canvas,
            );
            *state = next;
            report(state, &outcome, &mut self.canvas);

            if outcome.rendered || outcome.game_over {
                self.canvas.present(&mut self.out)?;
            }
            if state.status == GameStatus::GameOver {
                return Ok(false);
            }

            thread::sleep(self.config.schedule_interval());
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &Config) -> GameResult<()> {
    let file = File::create(&config.log_file)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> GameResult<()> {
    let config = Config::load()?;
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut app = App {
        out: &mut out,
        rx,
        canvas: TerminalCanvas::new(&config),
        config,
        rng,
        epoch: Instant::now(),
    };
    let result = app.run();
    drop(app);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}
