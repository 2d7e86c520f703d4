//! Launch the settings board example.

use std::{fs, path::PathBuf, process, sync::Mutex};

use anyhow::Result;
use clap::Parser;
use shellboard::{
    Options, Root,
    backend::crossterm::{CrosstermBackend, runloop_with},
};
use shellboard_examples::board::{BoardState, board, tick};
use tracing::Level;

/// CLI flags for the settings board example.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Load run options from a JSON file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write a trace log to this file.
    #[clap(short, long)]
    log: Option<PathBuf>,
}

/// Run the settings board.
pub fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        let file = fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .init();
    }

    let options = match &args.config {
        Some(path) => Options::from_json(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    tracing::info!(?options, "starting board");

    let state = BoardState::default();
    let mut root = Root::new(CrosstermBackend::default()).with_options(options);
    root.set_layout(board(&state))?;
    tick(&mut root, &state)?;

    let code = runloop_with(&mut root, |r| tick(r, &state))?;
    tracing::info!(code, saves = state.saves.get(), "board stopped");
    process::exit(code)
}
