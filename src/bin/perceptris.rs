//! perceptris CLI - tic-tac-toe against a hand-wired perceptron network
//!
//! This CLI provides:
//! - Interactive matches that can be mined for lessons afterwards
//! - One-off evaluation of a board
//! - Offline teaching from a recorded move list
//! - Inspection of the stored lessons

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "perceptris")]
#[command(version, about = "Tic-tac-toe agent built on a hand-wired perceptron network", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match in the terminal
    Play(perceptris::cli::commands::play::PlayArgs),

    /// Show how the agent answers a board
    Respond(perceptris::cli::commands::respond::RespondArgs),

    /// Mine a recorded match for lessons
    Learn(perceptris::cli::commands::learn::LearnArgs),

    /// List stored lessons
    Lessons(perceptris::cli::commands::lessons::LessonsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Play(args) => perceptris::cli::commands::play::execute(args),
        Commands::Respond(args) => perceptris::cli::commands::respond::execute(args),
        Commands::Learn(args) => perceptris::cli::commands::learn::execute(args),
        Commands::Lessons(args) => perceptris::cli::commands::lessons::execute(args),
    }
}
