//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on the board. Board cells are always nodes `0..9` of a network.
pub const BOARD_CELLS: usize = 9;

/// A cell on the board, doubling as the status of a network node.
///
/// The numeric encoding is what the network sums: CIRCLE is +1, STAR is -1
/// and EMPTY contributes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// The mark played by the network (`O`)
    Circle,
    /// The mark played by the opponent (`X`)
    Star,
}

impl Cell {
    pub fn value(self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::Circle => 1.0,
            Cell::Star => -1.0,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::Circle => 'O',
            Cell::Star => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '_' | '.' | ' ' => Some(Cell::Empty),
            'O' | 'o' | '0' => Some(Cell::Circle),
            'X' | 'x' | '*' => Some(Cell::Star),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One side of the game, identified by the mark it places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Circle,
    Star,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::Circle => Player::Star,
            Player::Star => Player::Circle,
        }
    }

    /// Convert player to the cell it writes
    pub fn mark(self) -> Cell {
        match self {
            Player::Circle => Cell::Circle,
            Player::Star => Cell::Star,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Circle => write!(f, "circle"),
            Player::Star => write!(f, "star"),
        }
    }
}

/// The nine cells of a tic-tac-toe board, row-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Board { cells }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace and `|` separators are ignored, so both `"OO__X___X"` and
    /// `"O O _ | _ X _ | _ _ X"` parse. Exactly nine cell characters must
    /// remain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardString`] for a wrong cell count or an
    /// unknown character.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if chars.len() != BOARD_CELLS {
            return Err(crate::Error::InvalidBoardString {
                input: s.to_string(),
                reason: format!("expected {BOARD_CELLS} cells, got {}", chars.len()),
            });
        }

        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidBoardString {
                input: s.to_string(),
                reason: format!("invalid character '{c}' at position {i}"),
            })?;
        }

        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos].is_empty()
    }

    /// Get all empty positions
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        BOARD_CELLS - self.count(Cell::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_CELLS
    }

    /// Place a mark and return the new board. Only an EMPTY cell can be written.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: usize, mark: Cell) -> Result<Board, crate::Error> {
        if pos >= BOARD_CELLS {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::CellOccupied { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = mark;
        Ok(next)
    }

    /// Compact single-line encoding, e.g. `OO__X___X`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let c = &self.cells[row * 3..row * 3 + 3];
            write!(f, "| {} {} {} | ", c[0], c[1], c[2])?;
            write!(f, "{}{}{}", row * 3, row * 3 + 1, row * 3 + 2)?;
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
