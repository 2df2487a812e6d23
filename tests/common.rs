//! Common test utilities for the perceptris test suite.
//!
//! Board enumeration and line counting used by the property tests.

#![allow(dead_code)]

use perceptris::tictactoe::{BOARD_CELLS, Board, Cell, WINNING_LINES};

/// Every assignment of EMPTY, CIRCLE and STAR to the nine cells (3^9 boards),
/// legal or not.
pub fn all_boards() -> impl Iterator<Item = Board> {
    (0..3usize.pow(BOARD_CELLS as u32)).map(|mut code| {
        let mut cells = [Cell::Empty; BOARD_CELLS];
        for cell in cells.iter_mut() {
            *cell = match code % 3 {
                0 => Cell::Empty,
                1 => Cell::Circle,
                _ => Cell::Star,
            };
            code /= 3;
        }
        Board::from_cells(cells)
    })
}

/// Every full board (CIRCLE or STAR in each cell).
pub fn full_boards() -> impl Iterator<Item = Board> {
    all_boards().filter(Board::is_full)
}

/// Number of lines held entirely by `mark`.
pub fn complete_lines(board: &Board, mark: Cell) -> usize {
    WINNING_LINES
        .iter()
        .filter(|line| line.iter().all(|&pos| board.get(pos) == mark))
        .count()
}

pub fn board(s: &str) -> Board {
    Board::from_string(s).unwrap()
}
