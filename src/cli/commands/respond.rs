//! Respond command - Evaluate a single board

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    agent::MoveKind,
    app::App,
    cli::{
        config::CommonArgs,
        output::{print_board, print_kv, print_section},
    },
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Show how the agent answers a board")]
pub struct RespondArgs {
    /// Board as nine cells, row by row: `O`, `X` and `_` (or `.`)
    pub board: String,

    /// Use the stored lessons as well as the built-in rules
    #[arg(long)]
    pub lessons: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct LessonResponse {
    kind: MoveKind,
    cell: Option<usize>,
    from: Board,
    to: Board,
}

pub fn execute(args: RespondArgs) -> Result<()> {
    let board = Board::from_string(&args.board).context("invalid board")?;
    let config = args.common.agent_config();
    let app = App::from_config(&config);

    if args.lessons {
        let mut agent = app.create_agent(&config)?;
        agent.load_board(&board)?;
        let mv = agent.get_computer_move()?;
        let response = LessonResponse {
            kind: mv.kind,
            cell: mv.cell,
            from: board,
            to: agent.board(),
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }
        print_section("Agent move");
        print_kv("tier", mv.kind.as_str());
        print_kv("cell", &mv.cell.map_or("-".to_string(), |c| c.to_string()));
        print_board(&response.to);
        return Ok(());
    }

    let mut rules = app.create_rules(&config)?;
    let response = rules.respond(&board)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }
    print_section("Response");
    print_kv("situation", response.situation.as_str());
    print_kv(
        "cell",
        &response
            .played_cell()
            .map_or("-".to_string(), |c| c.to_string()),
    );
    print_board(&response.to);
    Ok(())
}
