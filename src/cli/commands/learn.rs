//! Learn command - Teach the agent a match given on the command line

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use crate::{
    agent::Outcome,
    app::App,
    cli::{
        config::CommonArgs,
        output::{print_board, print_kv, print_section, print_subsection},
    },
    lessons::MatchHistory,
    tictactoe::Player,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirstMover {
    /// The agent (O) opened the match
    Computer,
    /// The human (X) opened the match
    Human,
}

impl From<FirstMover> for Player {
    fn from(first: FirstMover) -> Self {
        match first {
            FirstMover::Computer => Player::Circle,
            FirstMover::Human => Player::Star,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Mine a finished match for lessons")]
pub struct LearnArgs {
    /// Who made the first move
    #[arg(long, value_enum)]
    pub first: FirstMover,

    /// Cells in the order they were played, e.g. `4,0,8,2,6`
    #[arg(long, value_delimiter = ',', required = true)]
    pub moves: Vec<usize>,

    /// Print the updates as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: LearnArgs) -> Result<()> {
    let history = MatchHistory::from_moves(args.first.into(), args.moves.iter().copied())
        .context("invalid match")?;
    let board = history.final_board();
    let Some(outcome) = Outcome::of_board(&board) else {
        bail!("match {history} is not finished");
    };

    let config = args.common.agent_config();
    let app = App::from_config(&config);
    let updates = app.learn_from_match(&history, outcome)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&updates)?);
        return Ok(());
    }

    print_section("Match");
    print_kv("moves", &history.to_string());
    print_kv("outcome", &outcome.to_string());
    print_board(&board);

    print_subsection("Lessons");
    for update in &updates {
        print_kv(
            update.kind.as_str(),
            &format!(
                "{} mined, {} new, {} stored",
                update.mined, update.added, update.total
            ),
        );
    }
    Ok(())
}
