//! The built-in rule network and its `respond` protocol

use std::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::detector::{
    DetectorGroup, build_board, build_one_step, build_random_attack, build_three_in_a_row,
    build_tie,
};
use crate::{
    Result,
    network::{Activation, NodeId, PerceptronNetwork},
    tictactoe::{BOARD_CELLS, Board, Cell},
};

/// Node budget of a network built with [`RuleNetwork::new`].
pub const DEFAULT_CAPACITY: usize = 300;

/// Classification returned by [`RuleNetwork::respond`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    ComputerVictory,
    HumanVictory,
    Tie,
    BasicDefense,
    RandomAttack,
    UnableToRespond,
}

impl Situation {
    pub fn as_str(self) -> &'static str {
        match self {
            Situation::ComputerVictory => "computer_victory",
            Situation::HumanVictory => "human_victory",
            Situation::Tie => "tie",
            Situation::BasicDefense => "basic_defense",
            Situation::RandomAttack => "random_attack",
            Situation::UnableToRespond => "unable_to_respond",
        }
    }

    /// Situations the built-in rules resolve without any lesson.
    pub fn is_conclusive(self) -> bool {
        matches!(self, Situation::ComputerVictory | Situation::Tie)
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one `respond` call: the classification, the board it was
/// asked about and the board after the implied move (equal when no move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub situation: Situation,
    pub from: Board,
    pub to: Board,
}

impl Response {
    /// Cell written by the response, if any.
    pub fn played_cell(&self) -> Option<usize> {
        (0..BOARD_CELLS).find(|&pos| self.from.get(pos) != self.to.get(pos))
    }
}

/// Selects one of the built-in detector groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    ComputerVictory,
    HumanVictory,
    Tie,
    OneStepWin,
    OneStepDefense,
}

/// The built-in detector groups, kept apart from the network so one can be
/// fired while the network is borrowed mutably.
#[derive(Debug, Clone)]
struct BuiltinGroups {
    computer_victory: DetectorGroup,
    one_step_defense: DetectorGroup,
    one_step_win: DetectorGroup,
    human_victory: DetectorGroup,
    tie: DetectorGroup,
}

impl BuiltinGroups {
    fn get(&self, group: Group) -> &DetectorGroup {
        match group {
            Group::ComputerVictory => &self.computer_victory,
            Group::HumanVictory => &self.human_victory,
            Group::Tie => &self.tie,
            Group::OneStepWin => &self.one_step_win,
            Group::OneStepDefense => &self.one_step_defense,
        }
    }
}

/// The hand-wired topology of tic-tac-toe rules on top of a
/// [`PerceptronNetwork`], plus the random source used to break ties between
/// candidate cells.
#[derive(Debug, Clone)]
pub struct RuleNetwork {
    network: PerceptronNetwork,
    groups: BuiltinGroups,
    random_attack: Vec<NodeId>,
    rng: StdRng,
}

impl RuleNetwork {
    /// Build with the default capacity. `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY, seed)
    }

    pub fn with_capacity(capacity: usize, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(capacity, rng)
    }

    pub fn with_rng(capacity: usize, rng: StdRng) -> Result<Self> {
        let mut network = PerceptronNetwork::new("rules", capacity);

        build_board(&mut network)?;
        debug!(dimension = network.dimension(), "board cells wired");
        let computer_victory = build_three_in_a_row(&mut network, "computer victory", 1.0 / 3.0)?;
        debug!(dimension = network.dimension(), "computer victory wired");
        let one_step_defense = build_one_step(&mut network, "one-step defense", -0.5)?;
        debug!(dimension = network.dimension(), "one-step defense wired");
        let one_step_win = build_one_step(&mut network, "one-step win", 0.5)?;
        debug!(dimension = network.dimension(), "one-step win wired");
        let human_victory = build_three_in_a_row(&mut network, "human victory", -1.0 / 3.0)?;
        debug!(dimension = network.dimension(), "human victory wired");
        let random_attack = build_random_attack(&mut network)?;
        debug!(dimension = network.dimension(), "random attack wired");
        let tie = build_tie(&mut network)?;
        debug!(dimension = network.dimension(), "tie wired");

        Ok(Self {
            network,
            groups: BuiltinGroups {
                computer_victory,
                one_step_defense,
                one_step_win,
                human_victory,
                tie,
            },
            random_attack,
            rng,
        })
    }

    pub fn network(&self) -> &PerceptronNetwork {
        &self.network
    }

    /// Mutable access for layers that extend the topology with extra nodes.
    pub fn network_mut(&mut self) -> &mut PerceptronNetwork {
        &mut self.network
    }

    pub fn group(&self, group: Group) -> &DetectorGroup {
        self.groups.get(group)
    }

    /// The current statuses of cells 0..9.
    pub fn board(&self) -> Board {
        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = self.network.status(NodeId::cell(pos)).unwrap_or_default();
        }
        Board::from_cells(cells)
    }

    /// Overwrite cells 0..9 with `board`.
    pub fn load_board(&mut self, board: &Board) -> Result<()> {
        for (pos, &cell) in board.cells.iter().enumerate() {
            self.network.set_status(NodeId::cell(pos), cell)?;
        }
        Ok(())
    }

    /// Must run before every turn: detector nodes latch once activated.
    pub fn reset_all_but_the_board(&mut self) {
        self.network.reset_non_board_nodes();
    }

    /// Evaluate the cells in a shuffled order and stop at the first one that
    /// turns CIRCLE.
    pub fn try_move(&mut self) -> Result<Option<usize>> {
        let mut order: Vec<usize> = (0..BOARD_CELLS).collect();
        order.shuffle(&mut self.rng);
        for pos in order {
            if self.network.evaluate(NodeId::cell(pos))? == Activation::MoveDone {
                return Ok(Some(pos));
            }
        }
        Ok(None)
    }

    /// Fire one built-in group against the current board.
    pub fn detect(&mut self, group: Group) -> Result<bool> {
        self.groups.get(group).fire(&mut self.network)
    }

    /// Activate every random-attack node so each EMPTY cell becomes a candidate.
    pub fn arm_random_attack(&mut self) -> Result<()> {
        self.network.evaluate_batch(&self.random_attack)
    }

    /// Classify `board` and play the implied move, in the fixed priority
    /// order: victories, tie, one-step win, one-step defense, random attack.
    pub fn respond(&mut self, board: &Board) -> Result<Response> {
        self.reset_all_but_the_board();
        self.load_board(board)?;
        let situation = self.classify()?;
        let response = Response {
            situation,
            from: *board,
            to: self.board(),
        };
        debug!(board = %board.encode(), %situation, after = %response.to.encode(), "respond");
        Ok(response)
    }

    fn classify(&mut self) -> Result<Situation> {
        if self.detect(Group::ComputerVictory)? {
            return Ok(Situation::ComputerVictory);
        }
        if self.detect(Group::HumanVictory)? {
            return Ok(Situation::HumanVictory);
        }
        if self.detect(Group::Tie)? {
            return Ok(Situation::Tie);
        }
        if self.detect(Group::OneStepWin)? && self.try_move()?.is_some() {
            return Ok(Situation::ComputerVictory);
        }
        if self.detect(Group::OneStepDefense)? && self.try_move()?.is_some() {
            return Ok(Situation::BasicDefense);
        }
        self.arm_random_attack()?;
        if self.try_move()?.is_some() {
            return Ok(Situation::RandomAttack);
        }
        Ok(Situation::UnableToRespond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(seed: u64) -> RuleNetwork {
        RuleNetwork::new(Some(seed)).unwrap()
    }

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_topology_fits_default_capacity() {
        let rules = rules(1);
        assert_eq!(rules.network().dimension(), 9 + 9 + 25 + 25 + 9 + 9 + 43);
        assert!(rules.network().dimension() <= DEFAULT_CAPACITY);
        for pos in 0..BOARD_CELLS {
            let id = NodeId::cell(pos);
            assert_eq!(rules.network().weight(id, id), Some(2.0));
        }
    }

    #[test]
    fn test_groups_are_reachable_by_selector() {
        let rules = rules(1);
        assert_eq!(rules.group(Group::ComputerVictory).len(), 8);
        assert_eq!(rules.group(Group::HumanVictory).len(), 8);
        assert_eq!(rules.group(Group::OneStepWin).len(), 24);
        assert_eq!(rules.group(Group::OneStepDefense).len(), 24);
        assert_eq!(rules.group(Group::Tie).len(), 43);
        assert_ne!(
            rules.group(Group::OneStepWin).summary,
            rules.group(Group::OneStepDefense).summary
        );
    }

    #[test]
    fn test_too_small_capacity_is_reported() {
        assert!(matches!(
            RuleNetwork::with_capacity(50, Some(1)),
            Err(crate::Error::CapacityExceeded { capacity: 50 })
        ));
    }

    #[test]
    fn test_existing_victory_leaves_board_unchanged() {
        let mut rules = rules(3);
        let input = board("OOOXX____");
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::ComputerVictory);
        assert_eq!(response.to, input);
        assert_eq!(response.played_cell(), None);
    }

    #[test]
    fn test_human_victory() {
        let mut rules = rules(3);
        let response = rules.respond(&board("XXXOO_O__")).unwrap();
        assert_eq!(response.situation, Situation::HumanVictory);
    }

    #[test]
    fn test_full_board_is_tie() {
        let mut rules = rules(3);
        let input = board("OXOOXXXOO");
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::Tie);
        assert_eq!(response.to, input);
    }

    #[test]
    fn test_one_step_win_completes_line() {
        let mut rules = rules(5);
        let response = rules.respond(&board("OO__X___X")).unwrap();
        assert_eq!(response.situation, Situation::ComputerVictory);
        assert_eq!(response.to, board("OOO_X___X"));
        assert_eq!(response.played_cell(), Some(2));
    }

    #[test]
    fn test_one_step_defense_blocks_line() {
        let mut rules = rules(5);
        let response = rules.respond(&board("XX__O____")).unwrap();
        assert_eq!(response.situation, Situation::BasicDefense);
        assert_eq!(response.to, board("XXO_O____"));
    }

    #[test]
    fn test_empty_board_random_attack() {
        for seed in 0..10 {
            let mut rules = rules(seed);
            let response = rules.respond(&Board::new()).unwrap();
            assert_eq!(response.situation, Situation::RandomAttack);
            assert_eq!(response.to.count(Cell::Circle), 1);
            assert_eq!(response.to.count(Cell::Empty), 8);
        }
    }

    #[test]
    fn test_random_attack_avoids_occupied_cells() {
        let mut rules = rules(9);
        let input = board("X___O____");
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::RandomAttack);
        let cell = response.played_cell().unwrap();
        assert!(input.is_empty(cell));
        assert_eq!(response.to.occupied_count(), 3);
    }

    #[test]
    fn test_respond_is_repeatable_on_one_instance() {
        let mut rules = rules(11);
        let input = board("XX__O____");
        let first = rules.respond(&input).unwrap();
        let second = rules.respond(&input).unwrap();
        assert_eq!(first.situation, second.situation);
        assert_eq!(first.to, second.to);
    }

    #[test]
    fn test_same_seed_same_move() {
        let a = rules(42).respond(&Board::new()).unwrap();
        let b = rules(42).respond(&Board::new()).unwrap();
        assert_eq!(a.to, b.to);
    }
}
