//! Interaction port - the human side of a game session

use crate::{Result, tictactoe::Board};

/// Everything a [`crate::session::GameSession`] needs from the person playing.
///
/// Implementations own input validation: `choose_cell` only returns once it
/// has a number in `0..9` that names an EMPTY cell of `board`.
pub trait Interaction {
    /// Ask whether the human wants to move first.
    fn wants_to_play_first(&mut self) -> Result<bool>;

    /// Ask for the human's next cell.
    fn choose_cell(&mut self, board: &Board) -> Result<usize>;

    /// Show the current board.
    fn render_board(&mut self, board: &Board) -> Result<()>;

    /// Ask whether the finished match should be mined for lessons.
    fn wants_to_learn(&mut self) -> Result<bool>;

    /// Free-form message to the human (move explanations, the result).
    fn notify(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}
