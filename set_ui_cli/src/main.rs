use std::path::PathBuf;

use clap::Parser;
use cli_game::CliGame;
use set_core::DeckMode;
use settings::{Settings, DEFAULT_SETTINGS_FILE};

mod cli_game;
mod settings;

/// Play Set in the terminal
#[derive(Parser, Debug)]
#[command(name = "set", version)]
struct Args {
    /// Settings file, created when the deck mode changes
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Deck mode for this session (finite or infinite), overriding the settings file
    #[arg(long)]
    mode: Option<DeckMode>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(&args.settings)?;
    if let Some(mode) = args.mode {
        settings.deck_mode = mode;
    }
    CliGame::new(settings, args.settings, rand::thread_rng())?.run()
}
