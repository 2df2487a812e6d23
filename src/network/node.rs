//! Node identity and the single threshold unit

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::{BOARD_CELLS, Cell};

/// Trigger level every node is created with.
pub const DEFAULT_THRESHOLD: f64 = 0.9;

/// Dense index of a node inside one network, assigned at creation time.
///
/// Ids `0..9` are always the board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The node backing board cell `pos`.
    pub const fn cell(pos: usize) -> Self {
        Self(pos)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn is_board_cell(self) -> bool {
        self.0 < BOARD_CELLS
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scalar unit whose status is also its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdNode {
    pub name: String,
    pub threshold: f64,
    pub status: Cell,
}

impl ThresholdNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threshold: DEFAULT_THRESHOLD,
            status: Cell::Empty,
        }
    }

    /// Output value fed to downstream links.
    pub fn output(&self) -> f64 {
        self.status.value()
    }
}

/// Result of evaluating one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// A board cell crossed its threshold and was EMPTY, so it now holds CIRCLE.
    MoveDone,
    /// A board cell crossed its threshold but was already occupied.
    NoStatusChange,
    /// A non-board node crossed its threshold and now outputs CIRCLE.
    Activated,
    /// The weighted input stayed at or below the threshold.
    NotActivated,
}

impl Activation {
    pub fn is_activated(self) -> bool {
        self == Activation::Activated
    }
}
