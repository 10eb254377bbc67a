use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::{Stdout, Write, stdout};

use nova_defense::{App, GameConfig};

const LOG_FILE: &str = "nova-defense.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = GameConfig::load()?;
    log::info!("Starting with {:?}", config);

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    let setup = execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .wrap_err("entering the alternate screen")
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)).map_err(Into::into));
    let mut terminal = match setup {
        Ok(terminal) => terminal,
        Err(err) => {
            // Half-initialized terminal; undo what we can and report the setup failure
            let _ = restore_terminal(&mut std::io::stdout());
            return Err(err);
        }
    };

    let result = run(&mut terminal, config);

    // Cleanup: every step runs even if an earlier one fails
    let restored = restore_terminal(terminal.backend_mut());
    let cursor = terminal.show_cursor().wrap_err("showing the cursor");

    if let Err(err) = &result {
        log::error!("Exited with error: {err:?}");
    }
    result.and(restored).and(cursor)
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: GameConfig) -> Result<()> {
    let size = terminal.size()?;
    App::new(config, size.width, size.height).run(terminal)
}

/// Leave raw mode, mouse capture and the alternate screen.
/// Returns the first failure after attempting all three.
fn restore_terminal<W: Write>(out: &mut W) -> Result<()> {
    first_error([
        disable_raw_mode().wrap_err("disabling raw mode"),
        execute!(out, DisableMouseCapture).wrap_err("disabling mouse capture"),
        execute!(out, LeaveAlternateScreen).wrap_err("leaving the alternate screen"),
    ])
}

fn first_error(results: impl IntoIterator<Item = Result<()>>) -> Result<()> {
    let mut first = None;
    for result in results {
        if let Err(err) = result {
            log::warn!("Terminal restore step failed: {err}");
            first.get_or_insert(err);
        }
    }
    first.map_or(Ok(()), Err)
}

/// The terminal belongs to the game, so log records go to a file.
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("creating {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
