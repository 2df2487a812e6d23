//! Tic-Tac-Toe board primitives

pub mod board;
pub mod lines;

pub use board::{BOARD_CELLS, Board, Cell, Player};
pub use lines::{WINNING_LINES, completing_cells, has_line};
