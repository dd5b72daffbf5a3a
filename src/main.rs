//! Pong entry point
//!
//! Parses the command line and hands off to the game loop.

use clap::Parser;

use pong::Game;

/// Pong, against a merciless computer opponent
#[derive(Debug, Parser)]
#[command(name = "pong", version, about)]
struct Args {
    /// Run the game in debug mode: draws the computer player's ball-path
    /// prediction in red, and binds a freeze/step key during the event loop
    #[arg(long)]
    debug: bool,
}

fn main() -> pong::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("Parsed arguments: {:?}", args);

    Game::new().run(args.debug)
}
