//! Fixed-capacity weighted graph of threshold nodes
//!
//! Weights are stored per target node as an ordered map keyed by the source
//! node, so a missing entry means "no edge" and is never confused with a link
//! of weight zero. Activation sums inputs in ascending source order and adds
//! the bias last.

use std::collections::BTreeMap;

use tracing::debug;

use super::node::{Activation, NodeId, ThresholdNode};
use crate::{
    Error, Result,
    tictactoe::{BOARD_CELLS, Cell},
};

/// One input of a node as passed to [`PerceptronNetwork::set_inputs`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Weighted link from another node.
    Link(NodeId, f64),
    /// Contribution not tied to any source node.
    Bias(f64),
}

/// Directed weighted graph of [`ThresholdNode`]s with a fixed node budget.
#[derive(Debug, Clone)]
pub struct PerceptronNetwork {
    name: String,
    capacity: usize,
    nodes: Vec<ThresholdNode>,
    inputs: Vec<BTreeMap<NodeId, f64>>,
    bias: Vec<Option<f64>>,
}

impl PerceptronNetwork {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let name = name.into();
        debug!(network = %name, capacity, "allocated perceptron network");
        Self {
            name,
            capacity,
            nodes: Vec::with_capacity(capacity),
            inputs: Vec::with_capacity(capacity),
            bias: Vec::with_capacity(capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of nodes created so far.
    pub fn dimension(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&ThresholdNode> {
        self.nodes.get(id.index())
    }

    /// Append a node with the default threshold and EMPTY status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] once `capacity` nodes exist.
    pub fn new_node(&mut self, name: impl Into<String>) -> Result<NodeId> {
        if self.nodes.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(ThresholdNode::new(name));
        self.inputs.push(BTreeMap::new());
        self.bias.push(None);
        Ok(id)
    }

    fn check_ids(&self, from: NodeId, to: NodeId) -> Result<()> {
        let dimension = self.dimension();
        if from.index() < dimension && to.index() < dimension {
            Ok(())
        } else {
            Err(Error::InvalidNodeId {
                from: from.index(),
                to: to.index(),
                dimension,
            })
        }
    }

    /// Create or overwrite the link `from -> to`.
    pub fn new_link(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<()> {
        self.check_ids(from, to)?;
        self.inputs[to.index()].insert(from, weight);
        Ok(())
    }

    /// Wire a batch of inputs into `to`; later entries win on a repeated source.
    pub fn set_inputs(&mut self, to: NodeId, inputs: impl IntoIterator<Item = Input>) -> Result<()> {
        for input in inputs {
            match input {
                Input::Link(from, weight) => self.new_link(from, to, weight)?,
                Input::Bias(weight) => {
                    self.check_ids(to, to)?;
                    self.bias[to.index()] = Some(weight);
                }
            }
        }
        Ok(())
    }

    /// Weight of the link `from -> to`, `None` when no link exists.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.inputs.get(to.index())?.get(&from).copied()
    }

    pub fn bias(&self, id: NodeId) -> Option<f64> {
        self.bias.get(id.index()).copied().flatten()
    }

    pub fn status(&self, id: NodeId) -> Option<Cell> {
        self.nodes.get(id.index()).map(|node| node.status)
    }

    /// Direct external assignment, the only way a STAR ever enters the network.
    pub fn set_status(&mut self, id: NodeId, status: Cell) -> Result<()> {
        self.check_ids(id, id)?;
        self.nodes[id.index()].status = status;
        Ok(())
    }

    /// Weighted input sum of `id`: bias (if any) plus every incoming link
    /// times the source's current status.
    pub fn input_sum(&self, id: NodeId) -> Result<f64> {
        self.check_ids(id, id)?;
        let links: f64 = self.inputs[id.index()]
            .iter()
            .map(|(from, weight)| weight * self.nodes[from.index()].output())
            .sum();
        Ok(links + self.bias[id.index()].unwrap_or(0.0))
    }

    /// Evaluate the next status of one node.
    ///
    /// Only CIRCLE is ever written here. A board cell is written only while
    /// EMPTY; every other node is set to CIRCLE whenever its input sum exceeds
    /// the threshold. Below the threshold nothing changes.
    pub fn evaluate(&mut self, id: NodeId) -> Result<Activation> {
        let acc = self.input_sum(id)?;
        let node = &mut self.nodes[id.index()];
        if acc <= node.threshold {
            return Ok(Activation::NotActivated);
        }

        if id.is_board_cell() {
            if node.status.is_empty() {
                node.status = Cell::Circle;
                Ok(Activation::MoveDone)
            } else {
                Ok(Activation::NoStatusChange)
            }
        } else {
            node.status = Cell::Circle;
            Ok(Activation::Activated)
        }
    }

    /// Evaluate `ids` in order for their side effects only.
    pub fn evaluate_batch(&mut self, ids: &[NodeId]) -> Result<()> {
        for &id in ids {
            self.evaluate(id)?;
        }
        Ok(())
    }

    /// Put every node past the board cells back to EMPTY.
    pub fn reset_non_board_nodes(&mut self) {
        for node in self.nodes.iter_mut().skip(BOARD_CELLS) {
            node.status = Cell::Empty;
        }
    }
}
