//! Scripted interaction for tests and non-interactive runs.

use std::collections::VecDeque;

use crate::{Error, Result, ports::Interaction, tictactoe::Board};

/// Plays a fixed list of cells and answers every question the same way.
///
/// Scripted cells that are taken or off the board are skipped, the way a
/// terminal player would be asked again. Once the script runs out the lowest
/// EMPTY cell is played.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInteraction {
    cells: VecDeque<usize>,
    play_first: bool,
    learn: bool,
    pub boards: Vec<Board>,
    pub messages: Vec<String>,
}

impl ScriptedInteraction {
    pub fn new(play_first: bool, learn: bool) -> Self {
        Self {
            play_first,
            learn,
            ..Self::default()
        }
    }

    pub fn with_cells(mut self, cells: impl IntoIterator<Item = usize>) -> Self {
        self.cells.extend(cells);
        self
    }
}

impl Interaction for ScriptedInteraction {
    fn wants_to_play_first(&mut self) -> Result<bool> {
        Ok(self.play_first)
    }

    fn choose_cell(&mut self, board: &Board) -> Result<usize> {
        while let Some(cell) = self.cells.pop_front() {
            if cell < board.cells.len() && board.is_empty(cell) {
                return Ok(cell);
            }
        }
        board
            .empty_positions()
            .first()
            .copied()
            .ok_or(Error::InvalidConfiguration {
                message: "no empty cell left for the scripted player".to_string(),
            })
    }

    fn render_board(&mut self, board: &Board) -> Result<()> {
        self.boards.push(*board);
        Ok(())
    }

    fn wants_to_learn(&mut self) -> Result<bool> {
        Ok(self.learn)
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }
}
