//! Ordered record of the cells played in one match

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{BOARD_CELLS, Board, Cell, Player, has_line},
};

/// Who moved first plus the cells played, in order. Move `i` (1-based) was
/// made by the first mover when `i` is odd.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    first_mover: Player,
    moves: Vec<usize>,
}

impl MatchHistory {
    pub fn new(first_mover: Player) -> Self {
        Self {
            first_mover,
            moves: Vec::with_capacity(BOARD_CELLS),
        }
    }

    /// Build from a finished move list.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedMatch`] for more than nine moves, a cell outside
    /// `0..9`, a cell played twice or a move after a line was completed.
    pub fn from_moves(first_mover: Player, moves: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut history = Self::new(first_mover);
        for cell in moves {
            history.push(cell)?;
        }
        Ok(history)
    }

    pub fn push(&mut self, cell: usize) -> Result<()> {
        if self.moves.len() >= BOARD_CELLS {
            return Err(Error::MalformedMatch {
                message: format!("more than {BOARD_CELLS} moves"),
            });
        }
        if cell >= BOARD_CELLS {
            return Err(Error::MalformedMatch {
                message: format!("cell {cell} is off the board"),
            });
        }
        if self.moves.contains(&cell) {
            return Err(Error::MalformedMatch {
                message: format!("cell {cell} played twice"),
            });
        }
        let board = self.final_board();
        if has_line(&board, Cell::Circle) || has_line(&board, Cell::Star) {
            return Err(Error::MalformedMatch {
                message: format!("cell {cell} played after the match was decided"),
            });
        }
        self.moves.push(cell);
        Ok(())
    }

    /// Append the lowest occupied cell of `board` not yet recorded, if any.
    pub fn record_board(&mut self, board: &Board) -> Result<Option<usize>> {
        let new_cell =
            (0..BOARD_CELLS).find(|&pos| !board.is_empty(pos) && !self.moves.contains(&pos));
        if let Some(cell) = new_cell {
            self.push(cell)?;
        }
        Ok(new_cell)
    }

    pub fn first_mover(&self) -> Player {
        self.first_mover
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Player who made move `i` (1-based).
    pub fn mover_of(&self, i: usize) -> Player {
        if i % 2 == 1 {
            self.first_mover
        } else {
            self.first_mover.opponent()
        }
    }

    /// Board after the first `n` moves; `n` past the end gives the final board.
    pub fn board_after(&self, n: usize) -> Board {
        let mut board = Board::new();
        for (i, &cell) in self.moves.iter().take(n).enumerate() {
            board.cells[cell] = self.mover_of(i + 1).mark();
        }
        board
    }

    pub fn final_board(&self) -> Board {
        self.board_after(self.moves.len())
    }

    /// Same moves with `first_mover` swapped in.
    pub fn relabelled(&self, first_mover: Player) -> Self {
        Self {
            first_mover,
            moves: self.moves.clone(),
        }
    }

    /// Relabel so the side that made the last move plays CIRCLE.
    pub fn winner_perspective(&self) -> Self {
        if self.moves.len() % 2 == 1 {
            self.relabelled(Player::Circle)
        } else {
            self.relabelled(Player::Star)
        }
    }

    /// Relabel so the side that did not make the last move plays CIRCLE.
    pub fn loser_perspective(&self) -> Self {
        self.relabelled(self.winner_perspective().first_mover.opponent())
    }
}

impl fmt::Display for MatchHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} first:", self.first_mover)?;
        for cell in &self.moves {
            write!(f, " {cell}")?;
        }
        Ok(())
    }
}
