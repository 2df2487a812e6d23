//! Detector groups and the wiring that builds them
//!
//! Each builder appends nodes to a [`PerceptronNetwork`] in a fixed order. The
//! summary node of a group is created before its members (except for the tie
//! group, whose summary is its last member) so node ids stay stable across
//! builds.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    network::{Input, NodeId, PerceptronNetwork},
    tictactoe::{BOARD_CELLS, Cell, WINNING_LINES},
};

/// Weight of the self-link every board cell carries.
pub const CELL_SELF_WEIGHT: f64 = 2.0;

/// Auxiliary nodes plus the summary node that ORs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorGroup {
    pub name: String,
    pub members: Vec<NodeId>,
    pub summary: NodeId,
}

impl DetectorGroup {
    /// Evaluate the members in order, then the summary. True when the summary fires.
    pub fn fire(&self, network: &mut PerceptronNetwork) -> Result<bool> {
        network.evaluate_batch(&self.members)?;
        Ok(network.evaluate(self.summary)?.is_activated())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn or_summary(network: &mut PerceptronNetwork, summary: NodeId, members: &[NodeId]) -> Result<()> {
    network.set_inputs(summary, members.iter().map(|&id| Input::Link(id, 1.0)))
}

/// The nine board cells, each with a self-link.
pub(crate) fn build_board(network: &mut PerceptronNetwork) -> Result<()> {
    for pos in 0..BOARD_CELLS {
        let id = network.new_node(format!("cell {pos}"))?;
        network.new_link(id, id, CELL_SELF_WEIGHT)?;
    }
    Ok(())
}

/// One node per line summing its three cells with `weight`; with `1/3` the
/// summary fires on three CIRCLEs, with `-1/3` on three STARs.
pub(crate) fn build_three_in_a_row(
    network: &mut PerceptronNetwork,
    name: &str,
    weight: f64,
) -> Result<DetectorGroup> {
    let summary = network.new_node(name)?;
    let mut members = Vec::with_capacity(WINNING_LINES.len());
    for line in &WINNING_LINES {
        let id = network.new_node(format!("{name} {line:?}"))?;
        network.set_inputs(id, line.iter().map(|&pos| Input::Link(NodeId::cell(pos), weight)))?;
        members.push(id);
    }
    or_summary(network, summary, &members)?;
    Ok(DetectorGroup {
        name: name.to_string(),
        members,
        summary,
    })
}

/// For every line and every open cell in it, a node summing the other two
/// cells with `weight` and pushing weight 1 back into the open cell.
pub(crate) fn build_one_step(
    network: &mut PerceptronNetwork,
    name: &str,
    weight: f64,
) -> Result<DetectorGroup> {
    let summary = network.new_node(name)?;
    let mut members = Vec::with_capacity(WINNING_LINES.len() * 3);
    for line in &WINNING_LINES {
        for &open in line {
            let id = network.new_node(format!("{name} {line:?} -> {open}"))?;
            let others = line.iter().filter(|&&pos| pos != open);
            network.set_inputs(id, others.map(|&pos| Input::Link(NodeId::cell(pos), weight)))?;
            network.new_link(id, NodeId::cell(open), 1.0)?;
            members.push(id);
        }
    }
    or_summary(network, summary, &members)?;
    Ok(DetectorGroup {
        name: name.to_string(),
        members,
        summary,
    })
}

/// One node per cell pushing into that cell. The bias alone clears the
/// threshold for an EMPTY cell; the EMPTY-only write of board cells is what
/// keeps occupied cells untouched.
pub(crate) fn build_random_attack(network: &mut PerceptronNetwork) -> Result<Vec<NodeId>> {
    let mut members = Vec::with_capacity(BOARD_CELLS);
    for pos in 0..BOARD_CELLS {
        let id = network.new_node(format!("random attack -> {pos}"))?;
        network.set_inputs(id, [Input::Link(NodeId::cell(pos), 1.0), Input::Bias(1.0)])?;
        network.new_link(id, NodeId::cell(pos), 1.0)?;
        members.push(id);
    }
    Ok(members)
}

/// Appends the nodes that fire when `majority` holds at least five cells and
/// `minority` at least four, returning the prevalence node.
fn build_prevalence(
    network: &mut PerceptronNetwork,
    members: &mut Vec<NodeId>,
    majority: Cell,
    minority: Cell,
) -> Result<NodeId> {
    let mut counters = |mark: Cell| -> Result<Vec<NodeId>> {
        (0..BOARD_CELLS)
            .map(|pos| {
                let id = network.new_node(format!("tie: {mark} in cell {pos}"))?;
                network.set_inputs(id, [Input::Link(NodeId::cell(pos), mark.value())])?;
                members.push(id);
                Ok(id)
            })
            .collect()
    };
    let majority_cells = counters(majority)?;
    let minority_cells = counters(minority)?;

    let at_least_five = network.new_node(format!("tie: five {majority}"))?;
    network.set_inputs(
        at_least_five,
        majority_cells.iter().map(|&id| Input::Link(id, 1.0 / 5.0)),
    )?;
    members.push(at_least_five);

    let at_least_four = network.new_node(format!("tie: four {minority}"))?;
    network.set_inputs(
        at_least_four,
        minority_cells.iter().map(|&id| Input::Link(id, 1.0 / 4.0)),
    )?;
    members.push(at_least_four);

    let prevalence = network.new_node(format!("tie: {majority} prevalence"))?;
    network.set_inputs(
        prevalence,
        [
            Input::Link(at_least_five, 0.5),
            Input::Link(at_least_four, 0.5),
        ],
    )?;
    members.push(prevalence);
    Ok(prevalence)
}

/// Full-board detection: a 5/4 split of the two marks can only occur on a
/// full board.
pub(crate) fn build_tie(network: &mut PerceptronNetwork) -> Result<DetectorGroup> {
    let mut members = Vec::new();
    let star_prevalence = build_prevalence(network, &mut members, Cell::Star, Cell::Circle)?;
    let circle_prevalence = build_prevalence(network, &mut members, Cell::Circle, Cell::Star)?;

    let summary = network.new_node("tie")?;
    network.set_inputs(
        summary,
        [
            Input::Link(star_prevalence, 1.0),
            Input::Link(circle_prevalence, 1.0),
        ],
    )?;
    members.push(summary);
    Ok(DetectorGroup {
        name: "tie".to_string(),
        members,
        summary,
    })
}
