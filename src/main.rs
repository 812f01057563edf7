mod app;
mod config;
mod error;
mod events;
mod log;
mod picker;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;
use std::path::PathBuf;
use tokio::sync::mpsc;

use app::App;
use config::{Config, Overrides};
use events::{Action, EventHandler};
use picker::{Orientation, TickReceiver, TrackerKind};

const USAGE: &str = "usage: numpick [--min N] [--max N] [--step N] [--value N] \
[--tracker linear|exponential] [--orientation vertical|horizontal] [--config PATH]";

/// Parsed command line.
#[derive(Debug, Default)]
struct Cli {
    overrides: Overrides,
    config_path: Option<PathBuf>,
    help: bool,
}

fn parse_number(flag: &str, value: Option<&String>) -> Option<i32> {
    match value.map(|v| v.parse::<i32>()) {
        Some(Ok(n)) => Some(n),
        Some(Err(_)) => {
            eprintln!("Warning: {} expects an integer, ignoring", flag);
            None
        }
        None => {
            eprintln!("Warning: {} requires a value", flag);
            None
        }
    }
}

fn parse_args(args: &[String]) -> Cli {
    let mut cli = Cli::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--min" => cli.overrides.min = parse_number(flag, value),
            "--max" => cli.overrides.max = parse_number(flag, value),
            "--step" => cli.overrides.step = parse_number(flag, value),
            "--value" => cli.overrides.value = parse_number(flag, value),
            "--tracker" => {
                cli.overrides.tracker = value.and_then(|v| TrackerKind::parse(v));
                if cli.overrides.tracker.is_none() {
                    eprintln!("Warning: --tracker expects linear or exponential");
                }
            }
            "--orientation" => {
                cli.overrides.orientation = value.and_then(|v| Orientation::parse(v));
                if cli.overrides.orientation.is_none() {
                    eprintln!("Warning: --orientation expects vertical or horizontal");
                }
            }
            "--config" | "-c" => {
                cli.config_path = value.map(PathBuf::from);
                if cli.config_path.is_none() {
                    eprintln!("Warning: --config requires a path argument");
                }
            }
            "--help" | "-h" => {
                cli.help = true;
                i += 1;
                continue;
            }
            _ => {
                eprintln!("Warning: unknown argument '{}'", flag);
                i += 1;
                continue;
            }
        }
        i += 2;
    }

    cli
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);
    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    // Precedence: CLI > NUMPICK_CONFIG > default path > built-in defaults
    let config = Config::load(cli.config_path.as_deref()).with_overrides(&cli.overrides);

    let (tick_tx, tick_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&config.pickers(), tick_tx)?
        .with_config_source(cli.config_path, cli.overrides);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    tui::enter_terminal_modes(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, tick_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    tui::leave_terminal_modes(terminal.backend_mut())?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut tick_rx: TickReceiver,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|frame| {
            app.layout(frame.area());
            tui::ui::render(frame, app);
        })?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::FocusLost)) => app.cancel_interactions(),
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        app.dispatch(action);
                    }
                    Some(Err(e)) => {
                        log::log(&format!("Terminal event error: {}", e));
                        app.dispatch(Action::Quit);
                    }
                    None => app.dispatch(Action::Quit),
                }
            }
            Some(tick) = tick_rx.recv() => {
                app.handle_tick(tick);
            }
        }

        if app.should_quit {
            app.cancel_interactions();
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("numpick")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_overrides() {
        let cli = parse_args(&args(&[
            "--min",
            "-5",
            "--max",
            "5",
            "--tracker",
            "exponential",
            "--orientation",
            "horizontal",
            "--config",
            "/tmp/numpick.toml",
        ]));
        assert_eq!(cli.overrides.min, Some(-5));
        assert_eq!(cli.overrides.max, Some(5));
        assert_eq!(cli.overrides.tracker, Some(TrackerKind::Exponential));
        assert_eq!(cli.overrides.orientation, Some(Orientation::Horizontal));
        assert_eq!(cli.config_path, Some(PathBuf::from("/tmp/numpick.toml")));
        assert!(!cli.help);
    }

    #[test]
    fn test_parse_args_bad_values_ignored() {
        let cli = parse_args(&args(&["--step", "two", "--tracker", "spiral", "--bogus", "--value"]));
        assert_eq!(cli.overrides.step, None);
        assert_eq!(cli.overrides.tracker, None);
        assert_eq!(cli.overrides.value, None);
    }

    #[test]
    fn test_parse_args_help() {
        assert!(parse_args(&args(&["-h"])).help);
    }
}
