//! One interactive match between a human and a [`TrainedAgent`]
//!
//! The session only sequences calls: who starts, one move per turn, history
//! bookkeeping, the terminal check and the optional learning pass at the end.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    agent::{Outcome, TrainedAgent},
    app::{App, LessonUpdate},
    lessons::MatchHistory,
    ports::Interaction,
    tictactoe::Player,
};

/// How a session ended.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub history: MatchHistory,
    /// `None` only if the board filled up without a detected outcome.
    pub outcome: Option<Outcome>,
    /// Empty when the human declined learning.
    pub updates: Vec<LessonUpdate>,
}

pub struct GameSession<'a, I> {
    app: &'a App,
    agent: TrainedAgent,
    interaction: I,
}

impl<'a, I: Interaction> GameSession<'a, I> {
    pub fn new(app: &'a App, agent: TrainedAgent, interaction: I) -> Self {
        Self {
            app,
            agent,
            interaction,
        }
    }

    pub fn agent(&self) -> &TrainedAgent {
        &self.agent
    }

    pub fn into_interaction(self) -> I {
        self.interaction
    }

    /// Play one match to the end.
    pub fn play(&mut self) -> Result<SessionSummary> {
        let first = if self.interaction.wants_to_play_first()? {
            Player::Star
        } else {
            Player::Circle
        };
        self.agent.start_match(first)?;
        self.interaction.render_board(&self.agent.board())?;

        let mut turn = first;
        loop {
            self.agent.reset_all_but_the_board();
            match turn {
                Player::Star => self.human_turn()?,
                Player::Circle => {
                    let mv = self.agent.get_computer_move()?;
                    debug!(kind = %mv.kind, cell = ?mv.cell, "computer move");
                    self.interaction.notify(mv.kind.describe())?;
                }
            }
            turn = turn.opponent();

            self.agent.record_turn()?;
            let board = self.agent.board();
            self.interaction.render_board(&board)?;

            if let Some(outcome) = self.agent.check()? {
                return self.finish(outcome);
            }
            if board.is_full() {
                warn!(board = %board.encode(), "board full without an outcome");
                return Ok(SessionSummary {
                    history: self.agent.history().clone(),
                    outcome: None,
                    updates: Vec::new(),
                });
            }
        }
    }

    fn human_turn(&mut self) -> Result<()> {
        loop {
            let cell = self.interaction.choose_cell(&self.agent.board())?;
            match self.agent.place_human_move(cell) {
                Ok(()) => return Ok(()),
                Err(Error::CellOccupied { .. } | Error::InvalidPosition { .. }) => {
                    self.interaction
                        .notify(&format!("Cell {cell} is not available."))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Result<SessionSummary> {
        let message = match outcome {
            Outcome::ComputerVictory => "I have won!",
            Outcome::HumanVictory => "Great, you have won!",
            Outcome::Tie => "It's a tie!",
        };
        self.interaction.notify(message)?;

        let history = self.agent.history().clone();
        info!(%outcome, %history, "match over");

        let mut updates = Vec::new();
        if self.interaction.wants_to_learn()? {
            updates = self.app.learn_from_match(&history, outcome)?;
            for update in &updates {
                self.interaction.notify(&format!(
                    "Learnt {} new {} lesson(s), {} stored.",
                    update.added, update.kind, update.total
                ))?;
            }
        }

        Ok(SessionSummary {
            history,
            outcome: Some(outcome),
            updates,
        })
    }
}
