use std::io;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use canvas_snake::config::{
    ConfigError, DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, GameConfig, SnakeSize, SpeedPreset,
    SurfaceSize,
};
use canvas_snake::game::{GameState, GameStatus};
use canvas_snake::input::{Direction, GameInput};
use canvas_snake::renderer::{self, MarkerBoard};
use canvas_snake::terminal_runtime::{self, TerminalSession};

#[derive(Debug, Parser)]
#[command(version, about = "Classic canvas-style snake in the terminal")]
struct Cli {
    /// Tick speed preset: fast, moderate, slow or damn-slow.
    #[arg(long, default_value = "moderate", value_parser = parse_speed)]
    speed: SpeedPreset,

    /// Snake thickness preset: thin, normal or thick.
    #[arg(long, default_value = "thick", value_parser = parse_size)]
    size: SnakeSize,

    /// Play surface width in simulation units.
    #[arg(long, default_value_t = DEFAULT_SURFACE_WIDTH)]
    width: f64,

    /// Play surface height in simulation units.
    #[arg(long, default_value_t = DEFAULT_SURFACE_HEIGHT)]
    height: f64,

    /// RNG seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = match config_from_cli(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid options: {error}");
            process::exit(2);
        }
    };

    terminal_runtime::install_panic_hook();

    let mut session = TerminalSession::enter()?;
    run(&mut session, &config)
}

fn run(session: &mut TerminalSession, config: &GameConfig) -> io::Result<()> {
    let mut state = GameState::new(config);
    let mut board = MarkerBoard::new();
    board.apply(&state.drain_commands());

    let speed = config.speed;
    let tick_interval = speed.interval();
    let mut last_tick = Instant::now();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &state, &board, speed))?;

        if let Some(input) = poll_input(poll_timeout(tick_interval, last_tick))? {
            match input {
                GameInput::Quit => break,
                GameInput::Confirm if state.status == GameStatus::Over => {
                    state = GameState::new(config);
                    board = MarkerBoard::new();
                    board.apply(&state.drain_commands());
                    last_tick = Instant::now();
                }
                GameInput::Confirm => {}
                GameInput::Direction(direction) => state.handle_direction(direction),
            }
        }

        if state.status == GameStatus::Running && last_tick.elapsed() >= tick_interval {
            state.tick();
            board.apply(&state.drain_commands());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn config_from_cli(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let config = GameConfig {
        surface: SurfaceSize {
            width: cli.width,
            height: cli.height,
        },
        snake_size: cli.size,
        speed: cli.speed,
        seed: cli.seed,
        ..GameConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn parse_speed(raw: &str) -> Result<SpeedPreset, String> {
    raw.parse().map_err(|error: ConfigError| error.to_string())
}

fn parse_size(raw: &str) -> Result<SnakeSize, String> {
    raw.parse().map_err(|error: ConfigError| error.to_string())
}

fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<GameInput> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Waits for input up to the time of the next due tick, clamped so the
/// loop stays responsive on very slow presets and does not spin on very
/// fast ones.
fn poll_timeout(tick_interval: Duration, last_tick: Instant) -> Duration {
    tick_interval
        .saturating_sub(last_tick.elapsed())
        .clamp(Duration::from_millis(1), Duration::from_millis(16))
}
