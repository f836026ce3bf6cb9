use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tilequest::abilities::AbilityCatalog;
use tilequest::build_info;
use tilequest::character::{AttributeType, PlayerClass};
use tilequest::core::constants::{FRAME_POLL_MS, NUM_EQUIPMENT_SLOTS};
use tilequest::core::{FixedStep, Session, SessionConfig, SessionMode, TickEvent, TickResult};
use tilequest::input::{Heading, InputLatch, MenuCommand};
use tilequest::items::ItemCategory;
use tilequest::level::BuiltinAssets;
use tilequest::ui::{describe_event, draw_ui};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Ticks a movement key stays held after its last key event.
const KEY_HOLD_TICKS: u32 = 8;
const MAX_LOG_LINES: usize = 50;

struct Args {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn print_help() {
    println!("Tilequest - a tile-world RPG\n");
    println!("Usage: tilequest [options]\n");
    println!("Options:");
    println!("  --seed <n>       Fixed world seed");
    println!("  --config <path>  JSON session config");
    println!("  -v, --version    Show version info");
    println!("  -h, --help       Show this help message");
    println!("\nControls:");
    println!("  WASD / arrows    Move");
    println!("  1-4              Abilities in combat");
    println!("  E/T + 1-6        Equip or trash a bag item");
    println!("  U/R + 1-5        Unequip or trash worn gear");
    println!("  V/I/X            Spend an attribute point");
    println!("  P                Pause");
    println!("  Q / Esc          Quit");
}

fn parse_args() -> io::Result<Args> {
    let mut args = Args {
        seed: None,
        config: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!(
                    "tilequest {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                let value = iter.next().unwrap_or_default();
                let seed = value.parse().map_err(|_| {
                    io::Error::new(io::ErrorKind::InvalidInput, format!("bad seed: {value:?}"))
                })?;
                args.seed = Some(seed);
            }
            "--config" => {
                let path = iter.next().ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "--config needs a path")
                })?;
                args.config = Some(PathBuf::from(path));
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'tilequest --help' for usage.");
                std::process::exit(1);
            }
        }
    }
    Ok(args)
}

/// Sends tracing output to a log file; stdout belongs to the terminal UI.
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::cache_dir()?.join("tilequest").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "tilequest.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();
    tracing::info!("Log file: {}", log_dir.join("tilequest.log").display());
    Some(guard)
}

fn invalid_data(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err.to_string())
}

/// Gear action waiting for its slot digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingGear {
    Equip,
    Unequip,
    TrashBag,
    TrashGear,
}

/// What a key press asks of the loop.
enum Action {
    None,
    Quit,
    Menu(MenuCommand),
}

struct App {
    session: Session,
    rng: StdRng,
    latch: InputLatch,
    pending: Option<PendingGear>,
    messages: Vec<String>,
}

impl App {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let mode = self.session.mode();
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            return Action::Quit;
        }
        // Any key leaves the result screen
        if mode == SessionMode::Over {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') if mode != SessionMode::Classes => {
                self.latch.press(Heading::Up)
            }
            KeyCode::Down | KeyCode::Char('s') => self.latch.press(Heading::Down),
            KeyCode::Left | KeyCode::Char('a') => self.latch.press(Heading::Left),
            KeyCode::Right | KeyCode::Char('d') => self.latch.press(Heading::Right),
            KeyCode::Char('n') => return Action::Menu(MenuCommand::NewGame),
            KeyCode::Char('k') => return Action::Menu(MenuCommand::ChooseClass(PlayerClass::Knight)),
            KeyCode::Char('w') => return Action::Menu(MenuCommand::ChooseClass(PlayerClass::Wizard)),
            KeyCode::Char('h') => return Action::Menu(MenuCommand::ChooseClass(PlayerClass::Hunter)),
            KeyCode::Char('p') => {
                let command = if mode == SessionMode::Paused {
                    MenuCommand::Resume
                } else {
                    MenuCommand::Pause
                };
                return Action::Menu(command);
            }
            KeyCode::Char('e') => self.pending = Some(PendingGear::Equip),
            KeyCode::Char('u') => self.pending = Some(PendingGear::Unequip),
            KeyCode::Char('t') => self.pending = Some(PendingGear::TrashBag),
            KeyCode::Char('r') => self.pending = Some(PendingGear::TrashGear),
            KeyCode::Char('v') => {
                return Action::Menu(MenuCommand::SpendAttribute(AttributeType::Vitality))
            }
            KeyCode::Char('i') => {
                return Action::Menu(MenuCommand::SpendAttribute(AttributeType::Intelligence))
            }
            KeyCode::Char('x') => {
                return Action::Menu(MenuCommand::SpendAttribute(AttributeType::Dexterity))
            }
            KeyCode::Char(c) if c.is_ascii_digit() => return self.handle_digit(mode, c),
            _ => {}
        }
        Action::None
    }

    fn handle_digit(&mut self, mode: SessionMode, c: char) -> Action {
        let digit = c.to_digit(10).unwrap_or(0) as usize;
        if mode == SessionMode::Combat {
            if (1..=4).contains(&digit) {
                self.latch.press_ability(digit - 1);
            }
            return Action::None;
        }
        // Gear rows and bag rows are both numbered from 1
        let Some(index) = digit.checked_sub(1) else {
            self.pending = None;
            return Action::None;
        };
        let command = match self.pending.take() {
            Some(PendingGear::Equip) => MenuCommand::Equip(index),
            Some(PendingGear::TrashBag) => MenuCommand::Drop(NUM_EQUIPMENT_SLOTS + index),
            Some(PendingGear::TrashGear) if index < NUM_EQUIPMENT_SLOTS => MenuCommand::Drop(index),
            Some(PendingGear::Unequip) => match ItemCategory::slots().get(index) {
                Some(category) => MenuCommand::Unequip(*category),
                None => return Action::None,
            },
            _ => return Action::None,
        };
        Action::Menu(command)
    }

    fn record(&mut self, result: &TickResult) {
        for event in &result.events {
            match event {
                TickEvent::Sound(sound) => tracing::debug!("Sound cue {}", sound.cue()),
                TickEvent::MusicStarted => tracing::debug!("Music cue start"),
                _ => {}
            }
            if let Some(line) = describe_event(event) {
                self.messages.push(line);
            }
        }
        if self.messages.len() > MAX_LOG_LINES {
            let excess = self.messages.len() - MAX_LOG_LINES;
            self.messages.drain(..excess);
        }
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let mut step = FixedStep::default();
    let mut last_frame = Instant::now();

    loop {
        let now_ms = Utc::now().timestamp_millis();
        terminal.draw(|frame| {
            let snapshot = app.session.snapshot(now_ms);
            draw_ui(frame, &snapshot, &app.messages);
        })?;

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    match app.handle_key(key) {
                        Action::Quit => break,
                        Action::Menu(command) => {
                            let result = app.session.apply(command, now_ms);
                            if result.new_mode().is_some() {
                                app.latch.release_all();
                            }
                            app.record(&result);
                        }
                        Action::None => {}
                    }
                }
            }
        }

        let elapsed = last_frame.elapsed();
        last_frame = Instant::now();
        for _ in 0..step.advance(elapsed) {
            let input = app.latch.next_tick();
            let result = app.session.tick(&input, now_ms, &mut app.rng);
            if result.new_mode().is_some() {
                app.latch.release_all();
            }
            app.record(&result);
        }
    }
    tracing::info!("Quit after {} ticks", step.total_ticks());
    Ok(())
}

fn main() -> io::Result<()> {
    let args = parse_args()?;
    let _guard = setup_logging();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path).map_err(invalid_data)?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let catalog = Arc::new(AbilityCatalog::standard().map_err(invalid_data)?);
    let session =
        Session::new(config, catalog, &BuiltinAssets, &mut rng).map_err(invalid_data)?;
    tracing::info!(
        "tilequest {} ({}) starting",
        build_info::BUILD_DATE,
        build_info::BUILD_COMMIT
    );

    let mut app = App {
        session,
        rng,
        latch: InputLatch::new(KEY_HOLD_TICKS),
        pending: None,
        messages: Vec::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
