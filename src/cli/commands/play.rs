//! Play command - Interactive match against the trained agent

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::TerminalInteraction,
    app::App,
    cli::{config::CommonArgs, output::print_kv},
    lessons::LessonKind,
    session::GameSession,
};

#[derive(Parser, Debug)]
#[command(about = "Play a match against the agent in the terminal")]
pub struct PlayArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.common.agent_config();
    let app = App::from_config(&config);
    let agent = app
        .create_agent(&config)
        .context("failed to build the agent")?;

    println!("Welcome to perceptris!");
    for kind in LessonKind::ALL {
        print_kv(
            &format!("{kind} lessons"),
            &agent.lesson_count(kind).to_string(),
        );
    }
    println!();

    let mut session = GameSession::new(&app, agent, TerminalInteraction::stdio());
    session.play().context("match aborted")?;
    println!("End.");
    Ok(())
}
