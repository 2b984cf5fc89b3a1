//! deskcalc: desktop-style calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! deskcalc                          # Interactive calculator
//! deskcalc --keys "12 + 7 ="        # Replay keys, print the display
//! deskcalc --keys "5/0=" --json     # Print the full engine state
//! deskcalc --config calc.yaml -vv   # Custom config, debug logging
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deskcalc::config::CalcConfig;
use deskcalc::core::CalculatorEngine;
use deskcalc::error::AppResult;
use deskcalc::keymap::KeyMap;
use deskcalc::logging;

/// deskcalc: four-function calculator with a clickable keypad
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DESKCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Replay these keys headlessly instead of opening the calculator
    /// (digits . , + - * / = % n c, '<' for backspace)
    #[arg(short, long)]
    keys: Option<String>,

    /// With --keys, print the engine state as JSON
    #[arg(long, requires = "keys")]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = CalcConfig::load_or_default(cli.config.as_deref())?;
    logging::init(config.log_level.raised(cli.verbose));

    match cli.keys {
        Some(keys) => run_replay(&config, &keys, cli.json),
        None => run_interactive(&config),
    }
}

fn run_replay(config: &CalcConfig, keys: &str, json: bool) -> AppResult<()> {
    let events = KeyMap::from_config(config).parse_replay(keys)?;
    let mut engine = CalculatorEngine::new().with_error_token(config.error_token.clone());
    for event in events {
        engine.handle_input(event);
    }

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &engine.snapshot())?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", engine.display())?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(config: &CalcConfig) -> AppResult<()> {
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = event_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(feature = "tui")]
fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut ratatui::Terminal<B>,
    config: &CalcConfig,
) -> AppResult<()> {
    use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
    use deskcalc::tui::{layout, render, CalculatorApp};
    use ratatui::layout::Rect;

    let mut app = CalculatorApp::from_config(config);
    let mut keypad_area = Rect::default();
    tracing::info!("calculator started");

    while !app.should_quit() {
        terminal.draw(|f| {
            keypad_area = layout(f.area()).keypad;
            render(&app, f);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = app.input_handler().handle_key(key);
                app.apply(action);
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click(keypad_area, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    tracing::info!(display = app.screen_text(), "calculator closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_config: &CalcConfig) -> AppResult<()> {
    Err(deskcalc::error::AppError::config(
        "interactive mode needs the `tui` feature; use --keys for headless replay",
    ))
}
