//! Winning lines of the 3x3 board

use super::{Board, Cell};

/// Winning line indices on the 3x3 board, in the order the detector groups
/// are wired: rows, columns, main diagonal, anti-diagonal.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// True when some line holds three `mark`s.
pub fn has_line(board: &Board, mark: Cell) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&idx| board.get(idx) == mark))
}

/// Cells that would complete a line of `mark` (two `mark`s and one EMPTY).
pub fn completing_cells(board: &Board, mark: Cell) -> Vec<usize> {
    let mut cells = Vec::new();
    for line in &WINNING_LINES {
        let owned = line.iter().filter(|&&idx| board.get(idx) == mark).count();
        let open: Vec<usize> = line.iter().copied().filter(|&idx| board.is_empty(idx)).collect();
        if owned == 2 && open.len() == 1 && !cells.contains(&open[0]) {
            cells.push(open[0]);
        }
    }
    cells.sort_unstable();
    cells
}
