//! Cloud Jumper terminal entry point
//!
//! Owns the terminal: raw mode, the input thread, the screen flow and the
//! fixed-cadence loop. All game rules live in the library.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use cloud_jumper::audio::{AudioManager, Silent, SoundBackend, TerminalBell};
use cloud_jumper::config::GameConfig;
use cloud_jumper::consts::GAME_OVER_PAUSE_MS;
use cloud_jumper::highscores::{self, HighScore};
use cloud_jumper::platform::{FrameClock, HoldWindow, InputEvent, InputTranslator, Key};
use cloud_jumper::renderer::TerminalRenderer;
use cloud_jumper::settings::{GlyphSet, Settings};
use cloud_jumper::sim::{GameState, Showcase, tick};

const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Parser, Debug)]
#[command(
    name = "cloud-jumper",
    version,
    about = "Bounce from cloud to cloud and climb as high as you can"
)]
struct Opts {
    /// Game constants as JSON (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible first session
    #[arg(long)]
    seed: Option<u64>,

    /// Where the best score is kept
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Player preferences as JSON
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Run at a different frame rate, rescaling the per-frame constants
    /// (the physics must scale to whole pixels, e.g. 15 or 10)
    #[arg(long)]
    fps: Option<u32>,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Sprite characters: unicode or ascii (overrides the settings file)
    #[arg(long, value_parser = parse_glyphs)]
    glyphs: Option<GlyphSet>,

    /// Let the autopilot play
    #[arg(long)]
    demo: bool,
}

fn parse_glyphs(name: &str) -> Result<GlyphSet, String> {
    GlyphSet::from_str(name).ok_or_else(|| {
        format!(
            "unknown glyph set '{}' (expected {} or {})",
            name,
            GlyphSet::Unicode.as_str(),
            GlyphSet::Ascii.as_str()
        )
    })
}

enum Menu {
    Start,
    Quit,
}

/// Everything the screens share
struct App<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    config: GameConfig,
    renderer: TerminalRenderer,
    audio: AudioManager,
    high_score: HighScore,
    hold_window: Option<HoldWindow>,
    next_seed: u64,
    demo: bool,
    /// Ctrl-C seen; unwind every screen
    interrupted: bool,
}

fn key_of(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Key::Quit,
        KeyCode::Char('i') | KeyCode::Char('I') => Key::Instructions,
        _ => Key::Other,
    }
}

fn input_event(key: &KeyEvent) -> InputEvent {
    let k = key_of(key.code);
    match key.kind {
        KeyEventKind::Press => InputEvent::Press(k),
        KeyEventKind::Repeat => InputEvent::Repeat(k),
        KeyEventKind::Release => InputEvent::Release(k),
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl<W: Write> App<W> {
    /// Drain pending terminal events, handling resizes; returns key events
    fn poll_keys(&mut self) -> Result<Vec<KeyEvent>> {
        let mut keys = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(key) if is_interrupt(&key) => {
                    log::info!("Interrupted");
                    self.interrupted = true;
                }
                Event::Key(key) => keys.push(key),
                Event::Resize(cols, rows) => {
                    self.renderer
                        .resize(cols, rows, self.config.play_width, self.config.play_height);
                    self.out
                        .execute(terminal::Clear(terminal::ClearType::All))
                        .context("clearing the terminal")?;
                }
                _ => {}
            }
        }
        Ok(keys)
    }

    /// Key presses only; menus ignore repeats and releases
    fn poll_presses(&mut self) -> Result<Vec<Key>> {
        Ok(self
            .poll_keys()?
            .iter()
            .filter(|key| key.kind == KeyEventKind::Press)
            .map(|key| key_of(key.code))
            .collect())
    }

    fn present(&mut self) -> Result<()> {
        self.renderer
            .present(&mut self.out)
            .context("drawing to the terminal")
    }

    fn seed(&mut self) -> u64 {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        seed
    }

    fn title_screen(&mut self) -> Result<Menu> {
        let seed = self.seed();
        let mut scene = Showcase::title(&self.config, seed);
        let mut clock = FrameClock::new(self.config.fps);
        loop {
            for key in self.poll_presses()? {
                match key {
                    Key::Fire => return Ok(Menu::Start),
                    Key::Quit => return Ok(Menu::Quit),
                    Key::Instructions => self.instruction_screen()?,
                    _ => {}
                }
            }
            if self.interrupted {
                return Ok(Menu::Quit);
            }
            scene.update();
            self.renderer.draw_title(&scene, self.high_score.best);
            self.present()?;
            clock.wait();
        }
    }

    fn instruction_screen(&mut self) -> Result<()> {
        let mut clock = FrameClock::new(self.config.fps);
        loop {
            if !self.poll_presses()?.is_empty() || self.interrupted {
                return Ok(());
            }
            self.renderer.draw_instructions();
            self.present()?;
            clock.wait();
        }
    }

    /// Run one session to game over or quit; returns the final score
    fn play(&mut self) -> Result<u64> {
        let seed = self.seed();
        let mut state = GameState::new(self.config.clone(), seed);
        let mut input = InputTranslator::new(self.hold_window);
        input.set_autopilot(self.demo);
        let mut clock = FrameClock::new(self.config.fps);
        let mut last_frame = Instant::now();

        loop {
            for key in self.poll_keys()? {
                input.handle(input_event(&key));
            }
            let mut commands = input.take();
            commands.quit |= self.interrupted;

            tick(&mut state, &commands);
            self.audio.play_events(&state.events);

            let fps = 1.0 / last_frame.elapsed().as_secs_f32().max(f32::EPSILON);
            last_frame = Instant::now();
            self.renderer
                .draw_game(&state, self.high_score.best, Some(fps));
            self.present()?;

            if state.is_over() || state.quit_requested {
                break;
            }
            clock.wait();
        }

        log::info!(
            "Session over: score {} after {} ticks ({} of {} frames late)",
            state.score,
            state.time_ticks,
            clock.late_frames(),
            clock.frames()
        );

        if !self.interrupted {
            self.renderer.draw_game_over_banner();
            self.present()?;
            thread::sleep(Duration::from_millis(GAME_OVER_PAUSE_MS));
            // Keys pressed during the pause should not skip the next screen
            self.poll_keys()?;
        }
        Ok(state.score)
    }

    fn score_screen(&mut self, score: u64, new_best: bool) -> Result<Menu> {
        let seed = self.seed();
        let mut scene = Showcase::score_screen(&self.config, seed);
        let mut clock = FrameClock::new(self.config.fps);
        loop {
            for key in self.poll_presses()? {
                match key {
                    Key::Fire => return Ok(Menu::Start),
                    Key::Quit => return Ok(Menu::Quit),
                    _ => {}
                }
            }
            if self.interrupted {
                return Ok(Menu::Quit);
            }
            scene.update();
            self.renderer
                .draw_score_screen(&scene, score, self.high_score.best, new_best);
            self.present()?;
            clock.wait();
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            if let Menu::Quit = self.title_screen()? {
                return Ok(());
            }
            let score = self.play()?;
            let new_best = self.high_score.record(score);
            if new_best {
                log::info!("New best score {}", score);
            }
            if self.interrupted {
                return Ok(());
            }
            if let Menu::Quit = self.score_screen(score, new_best)? {
                return Ok(());
            }
        }
    }
}

fn load_config(opts: &Opts) -> Result<GameConfig> {
    let mut config = match &opts.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading game config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(fps) = opts.fps {
        config = config
            .scaled_to_fps(fps)
            .with_context(|| format!("cannot run at {} fps", fps))?;
    }
    config.validate().context("invalid game config")?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Opts::parse();
    let config = load_config(&opts)?;

    let settings_existed = opts.settings.exists();
    let mut settings = Settings::load(&opts.settings);
    if let Some(glyphs) = opts.glyphs {
        settings.glyphs = glyphs;
    }
    if !settings_existed {
        if let Err(e) = settings.save(&opts.settings) {
            log::warn!("Could not write {}: {}", opts.settings.display(), e);
        }
    }
    if opts.mute {
        settings.muted = true;
    }

    let high_score_path = highscores::resolve_path(opts.high_score_file.as_deref());
    let high_score = HighScore::load(&high_score_path);

    let backend: Box<dyn SoundBackend> = if settings.muted {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::default())
    };
    let audio = AudioManager::with_settings(backend, &settings);
    log::debug!("Audio muted: {}", audio.is_muted());

    let seed = opts.seed.unwrap_or_else(clock_seed);
    log::info!("Cloud Jumper starting (seed {})", seed);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering the alternate screen")?;
    out.execute(cursor::Hide).context("hiding the cursor")?;

    // Key release events when the terminal can report them, otherwise held
    // directions expire once auto-repeats stop arriving
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::debug!("Keyboard enhancement: {}", keyboard_enhanced);

    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let mut renderer = TerminalRenderer::new(
        settings.glyphs,
        cols,
        rows,
        config.play_width,
        config.play_height,
    );
    renderer.set_show_fps(settings.show_fps);

    let hold_window = (!keyboard_enhanced).then(|| HoldWindow::for_fps(config.fps));
    let mut app = App {
        out,
        rx,
        config,
        renderer,
        audio,
        high_score,
        hold_window,
        next_seed: seed,
        demo: opts.demo,
        interrupted: false,
    };
    let result = app.run();

    // Always restore the terminal
    let mut out = app.out;
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = app.high_score.save(&high_score_path) {
        log::warn!("Could not save high score to {}: {}", high_score_path.display(), e);
    }

    result
}
