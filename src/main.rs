use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal;

use fight_kokaton::assets::{Assets, ManifestLoader};
use fight_kokaton::clock::FrameClock;
use fight_kokaton::config::{Args, GameConfig};
use fight_kokaton::display::{with_game_screen, TerminalSurface};
use fight_kokaton::entities::GameState;
use fight_kokaton::game::{self, Ending, SessionSummary};
use fight_kokaton::input::TerminalInput;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to `log_file` when given.  Otherwise they are off unless
/// `RUST_LOG` asks for them: stderr would scribble over the game screen.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_assets(config: &GameConfig) -> Result<Assets> {
    let loader = match &config.assets_dir {
        Some(dir) => ManifestLoader::from_dir(dir)?,
        None => ManifestLoader::embedded()?,
    };
    Ok(Assets::load(&loader)?)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = GameConfig::try_from(&args)?;
    let assets = load_assets(&config).context("loading sprites")?;
    let state = game::new_game(&config, &assets);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let result = with_game_screen(&mut out, &config.title, |out| {
        run(out, &config, &assets, state)
    });
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    report(&summary);
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    assets: &Assets,
    state: GameState,
) -> Result<SessionSummary> {
    let size = terminal::size().context("querying terminal size")?;
    let mut surface = TerminalSurface::new(out, config.width, config.height, size);
    let mut input = TerminalInput::new();
    let mut clock = FrameClock::new();
    game::play(state, config, assets, &mut surface, &mut input, &mut clock)
}

fn report(summary: &SessionSummary) {
    let how = match (summary.ending, summary.cleared) {
        (Ending::Defeated, _) => "hit by a bomb",
        (Ending::Quit, true) => "all bombs cleared",
        (Ending::Quit, false) => "quit",
    };
    println!(
        "Score: {}  ({}, {} frames)",
        summary.score, how, summary.frames
    );
}
