mod app;
mod cli;
mod clock;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::cli::Arguments;
use crate::config::Config;
use crate::game::Game;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use log::{debug, info};
use std::io::{self, ErrorKind, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::Command::from_parser(lexopt::Parser::from_env()) {
        Ok(cli::Command::Run(args)) => args,
        Ok(cli::Command::Help) => {
            print!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(cli::Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            return ExitCode::from(2);
        }
    };
    let game = match setup(&args) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange).and_then(|()| App::new(game).run(terminal));
    disable_focus_change(&mut io::stdout());
    ratatui::restore();
    io_exit(r)
}

/// Load the configuration, apply the command-line overrides, start logging,
/// and set up the game
fn setup(args: &Arguments) -> anyhow::Result<Game> {
    let (mut config, path) = match args.config {
        Some(ref path) => (
            Config::load(path, false).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            Some(path.clone()),
        ),
        None => match Config::default_path() {
            Ok(path) => (
                Config::load(&path, true).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })?,
                Some(path),
            ),
            Err(_) => (Config::default(), None),
        },
    };
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;
    if let Some(ref path) = config.log_file {
        logging::init(path)
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
    }
    if let Some(path) = path {
        info!("Using configuration file path {}", path.display());
    }
    info!(
        "Starting gridsnake {}: board size {}, tick {}ms, wraparound {}",
        env!("CARGO_PKG_VERSION"),
        config.board_size,
        config.tick_ms,
        config.wraparound,
    );
    Game::new(&config).context("failed to set up game")
}

/// Turn off focus-change reporting.  Failure is logged rather than reported,
/// as the terminal is being torn down anyway.  Returns whether it succeeded.
fn disable_focus_change<W: Write>(out: &mut W) -> bool {
    match execute!(out, DisableFocusChange) {
        Ok(()) => true,
        Err(e) => {
            debug!("Failed to disable focus change reporting: {e}");
            false
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
