//! The playing agent: built-in rules plus learnt lessons
//!
//! [`TrainedAgent`] embeds a [`RuleNetwork`] and extends its network with one
//! detector group per lesson category. Each rule becomes a node reading the
//! nine cells with the rule's weights and pushing into the rule's target cell.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    lessons::{LessonKind, LessonSet, MatchHistory, Rule},
    network::{Input, NodeId},
    rules::{DetectorGroup, Group, RuleNetwork},
    tictactoe::{BOARD_CELLS, Board, Cell, Player, has_line},
};

/// Which tier of [`TrainedAgent::get_computer_move`] produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    NoPossibleMove,
    OneStepWinning,
    BasicDefense,
    LearntDefense,
    LessonsLearntWinningAttack,
    LessonsLearntTieAttack,
    RandomAttack,
    UnableToRespond,
}

impl MoveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MoveKind::NoPossibleMove => "no_possible_move",
            MoveKind::OneStepWinning => "one_step_winning",
            MoveKind::BasicDefense => "basic_defense",
            MoveKind::LearntDefense => "learnt_defense",
            MoveKind::LessonsLearntWinningAttack => "lessons_learnt_winning_attack",
            MoveKind::LessonsLearntTieAttack => "lessons_learnt_tie_attack",
            MoveKind::RandomAttack => "random_attack",
            MoveKind::UnableToRespond => "unable_to_respond",
        }
    }

    /// Human-readable explanation shown after the move.
    pub fn describe(self) -> &'static str {
        match self {
            MoveKind::NoPossibleMove => "The board is full, I cannot move.",
            MoveKind::OneStepWinning => "With this move I win.",
            MoveKind::BasicDefense => "Blocking your line.",
            MoveKind::LearntDefense => "Defending with what I learnt from lost matches.",
            MoveKind::LessonsLearntWinningAttack => "Attacking with what I learnt from won matches.",
            MoveKind::LessonsLearntTieAttack => "Playing what I learnt from drawn matches.",
            MoveKind::RandomAttack => "A random move, I can't do better here.",
            MoveKind::UnableToRespond => "I don't know what to do.",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computer move: the tier that decided it and the cell written, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerMove {
    pub kind: MoveKind,
    pub cell: Option<usize>,
}

/// Terminal state of a board as reported by [`TrainedAgent::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ComputerVictory,
    HumanVictory,
    Tie,
}

impl Outcome {
    /// Direct board inspection in the same order `check` uses.
    pub fn of_board(board: &Board) -> Option<Outcome> {
        if has_line(board, Cell::Circle) {
            Some(Outcome::ComputerVictory)
        } else if has_line(board, Cell::Star) {
            Some(Outcome::HumanVictory)
        } else if board.is_full() {
            Some(Outcome::Tie)
        } else {
            None
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::ComputerVictory => write!(f, "computer_victory"),
            Outcome::HumanVictory => write!(f, "human_victory"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

#[derive(Debug)]
pub struct TrainedAgent {
    core: RuleNetwork,
    learnt_win: Option<DetectorGroup>,
    learnt_tie: Option<DetectorGroup>,
    learnt_not_lose: Option<DetectorGroup>,
    history: MatchHistory,
}

impl TrainedAgent {
    /// Extend `core` with the lesson groups, imported in the order win, tie,
    /// not-lose. Empty sets add no nodes.
    pub fn new(core: RuleNetwork, lessons: &LessonSet) -> Result<Self> {
        let mut agent = Self {
            core,
            learnt_win: None,
            learnt_tie: None,
            learnt_not_lose: None,
            history: MatchHistory::new(Player::Circle),
        };
        agent.learnt_win = agent.import(LessonKind::Win, &lessons.win)?;
        agent.learnt_tie = agent.import(LessonKind::Tie, &lessons.tie)?;
        agent.learnt_not_lose = agent.import(LessonKind::NotLose, &lessons.not_lose)?;

        let network = agent.core.network();
        info!(
            used = network.dimension(),
            capacity = network.capacity(),
            "perceptron network ready"
        );
        Ok(agent)
    }

    fn import(&mut self, kind: LessonKind, rules: &[Rule]) -> Result<Option<DetectorGroup>> {
        if rules.is_empty() {
            info!(%kind, "no lessons to import");
            return Ok(None);
        }

        let network = self.core.network_mut();
        let mut members = Vec::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            rule.validate()?;
            let id = network.new_node(format!("lesson {kind} #{i}"))?;
            network.set_inputs(
                id,
                rule.pattern
                    .iter()
                    .enumerate()
                    .map(|(pos, &w)| Input::Link(NodeId::cell(pos), w)),
            )?;
            network.new_link(id, NodeId::cell(rule.target), 1.0)?;
            members.push(id);
        }
        let summary = network.new_node(format!("lessons {kind}"))?;
        network.set_inputs(summary, members.iter().map(|&id| Input::Link(id, 1.0)))?;

        info!(%kind, rules = rules.len(), "imported lessons");
        Ok(Some(DetectorGroup {
            name: format!("lessons {kind}"),
            members,
            summary,
        }))
    }

    pub fn core(&self) -> &RuleNetwork {
        &self.core
    }

    pub fn board(&self) -> Board {
        self.core.board()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn lesson_count(&self, kind: LessonKind) -> usize {
        let group = match kind {
            LessonKind::Win => &self.learnt_win,
            LessonKind::Tie => &self.learnt_tie,
            LessonKind::NotLose => &self.learnt_not_lose,
        };
        group.as_ref().map_or(0, DetectorGroup::len)
    }

    /// Clear the board and start a new history.
    pub fn start_match(&mut self, first_mover: Player) -> Result<()> {
        self.core.reset_all_but_the_board();
        self.core.load_board(&Board::new())?;
        self.history = MatchHistory::new(first_mover);
        debug!(%first_mover, "match started");
        Ok(())
    }

    /// Continue from an arbitrary position, e.g. one supplied on the command line.
    pub fn load_board(&mut self, board: &Board) -> Result<()> {
        self.core.reset_all_but_the_board();
        self.core.load_board(board)
    }

    pub fn reset_all_but_the_board(&mut self) {
        self.core.reset_all_but_the_board();
    }

    /// Write the human's STAR.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPosition`] or [`Error::CellOccupied`]; both leave the
    /// board untouched so the caller can ask again.
    pub fn place_human_move(&mut self, pos: usize) -> Result<()> {
        if pos >= BOARD_CELLS {
            return Err(Error::InvalidPosition { position: pos });
        }
        if !self.board().is_empty(pos) {
            return Err(Error::CellOccupied { position: pos });
        }
        self.core
            .network_mut()
            .set_status(NodeId::cell(pos), Cell::Star)
    }

    /// Append the cell played this turn to the history.
    pub fn record_turn(&mut self) -> Result<Option<usize>> {
        let board = self.board();
        self.history.record_board(&board)
    }

    fn fire_lessons(&mut self, kind: LessonKind) -> Result<bool> {
        let group = match kind {
            LessonKind::Win => &self.learnt_win,
            LessonKind::Tie => &self.learnt_tie,
            LessonKind::NotLose => &self.learnt_not_lose,
        };
        match group {
            Some(group) => group.fire(self.core.network_mut()),
            None => Ok(false),
        }
    }

    fn tier(&mut self, fired: bool) -> Result<Option<usize>> {
        if fired { self.core.try_move() } else { Ok(None) }
    }

    /// Play CIRCLE's move. Tiers are tried in order; a tier whose detectors
    /// fire but that finds no EMPTY cell to write falls through to the next.
    pub fn get_computer_move(&mut self) -> Result<ComputerMove> {
        self.core.reset_all_but_the_board();
        let done = |kind, cell| Ok(ComputerMove { kind, cell: Some(cell) });

        if self.core.detect(Group::Tie)? {
            return Ok(ComputerMove {
                kind: MoveKind::NoPossibleMove,
                cell: None,
            });
        }

        let fired = self.core.detect(Group::OneStepWin)?;
        if let Some(cell) = self.tier(fired)? {
            return done(MoveKind::OneStepWinning, cell);
        }
        let fired = self.core.detect(Group::OneStepDefense)?;
        if let Some(cell) = self.tier(fired)? {
            return done(MoveKind::BasicDefense, cell);
        }
        let fired = self.fire_lessons(LessonKind::NotLose)?;
        if let Some(cell) = self.tier(fired)? {
            return done(MoveKind::LearntDefense, cell);
        }
        let fired = self.fire_lessons(LessonKind::Win)?;
        if let Some(cell) = self.tier(fired)? {
            return done(MoveKind::LessonsLearntWinningAttack, cell);
        }
        let fired = self.fire_lessons(LessonKind::Tie)?;
        if let Some(cell) = self.tier(fired)? {
            return done(MoveKind::LessonsLearntTieAttack, cell);
        }

        self.core.arm_random_attack()?;
        if let Some(cell) = self.core.try_move()? {
            return done(MoveKind::RandomAttack, cell);
        }
        Ok(ComputerMove {
            kind: MoveKind::UnableToRespond,
            cell: None,
        })
    }

    /// Terminal-state query: computer victory, then human victory, then tie.
    pub fn check(&mut self) -> Result<Option<Outcome>> {
        self.core.reset_all_but_the_board();
        if self.core.detect(Group::ComputerVictory)? {
            return Ok(Some(Outcome::ComputerVictory));
        }
        if self.core.detect(Group::HumanVictory)? {
            return Ok(Some(Outcome::HumanVictory));
        }
        if self.core.detect(Group::Tie)? {
            return Ok(Some(Outcome::Tie));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(lessons: &LessonSet) -> TrainedAgent {
        TrainedAgent::new(RuleNetwork::new(Some(7)).unwrap(), lessons).unwrap()
    }

    fn pattern(weights: &[(usize, f64)]) -> [f64; BOARD_CELLS] {
        let mut pattern = [0.0; BOARD_CELLS];
        for &(pos, w) in weights {
            pattern[pos] = w;
        }
        pattern
    }

    #[test]
    fn test_lesson_groups_extend_network() {
        let base = agent(&LessonSet::default());
        let base_size = base.core().network().dimension();
        assert_eq!(base.lesson_count(LessonKind::Win), 0);

        let lessons = LessonSet {
            win: vec![Rule::new([0.0; BOARD_CELLS], 4), Rule::new([0.0; BOARD_CELLS], 0)],
            tie: Vec::new(),
            not_lose: vec![Rule::new([0.0; BOARD_CELLS], 8)],
        };
        let trained = agent(&lessons);
        // one node per rule plus one summary per non-empty group
        assert_eq!(trained.core().network().dimension(), base_size + 3 + 2);
        assert_eq!(trained.lesson_count(LessonKind::Win), 2);
        assert_eq!(trained.lesson_count(LessonKind::NotLose), 1);
        assert_eq!(trained.lesson_count(LessonKind::Tie), 0);
    }

    #[test]
    fn test_learnt_win_beats_random_attack() {
        // O in the centre, X in a corner: no built-in rule applies
        let lessons = LessonSet {
            win: vec![Rule::new(pattern(&[(0, -0.5), (4, 0.5)]), 8)],
            ..LessonSet::default()
        };
        let mut agent = agent(&lessons);
        agent
            .load_board(&Board::from_string("X___O____").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::LessonsLearntWinningAttack);
        assert_eq!(mv.cell, Some(8));
    }

    #[test]
    fn test_learnt_defense_outranks_learnt_win() {
        let board_pattern = pattern(&[(0, -0.5), (4, 0.5)]);
        let lessons = LessonSet {
            win: vec![Rule::new(board_pattern, 8)],
            tie: Vec::new(),
            not_lose: vec![Rule::new(board_pattern, 2)],
        };
        let mut agent = agent(&lessons);
        agent
            .load_board(&Board::from_string("X___O____").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::LearntDefense);
        assert_eq!(mv.cell, Some(2));
    }

    #[test]
    fn test_builtin_tiers_outrank_lessons() {
        let lessons = LessonSet {
            not_lose: vec![Rule::new(pattern(&[(0, 0.5), (1, 0.5)]), 5)],
            ..LessonSet::default()
        };
        let mut agent = agent(&lessons);
        agent
            .load_board(&Board::from_string("OO__X___X").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::OneStepWinning);
        assert_eq!(mv.cell, Some(2));
        assert_eq!(agent.check().unwrap(), Some(Outcome::ComputerVictory));
    }

    #[test]
    fn test_off_board_lesson_target_is_rejected() {
        let lessons = LessonSet {
            not_lose: vec![Rule::new(pattern(&[(4, 1.0)]), 20)],
            ..LessonSet::default()
        };
        let err = TrainedAgent::new(RuleNetwork::new(Some(7)).unwrap(), &lessons).unwrap_err();
        assert!(matches!(err, Error::InvalidLessonTarget { target: 20 }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_learnt_defense_on_occupied_cell_falls_through() {
        // the not-lose rule fires but points at the X in cell 0
        let board_pattern = pattern(&[(0, -0.5), (4, 0.5)]);
        let lessons = LessonSet {
            win: vec![Rule::new(board_pattern, 8)],
            tie: Vec::new(),
            not_lose: vec![Rule::new(board_pattern, 0)],
        };
        let mut agent = agent(&lessons);
        agent
            .load_board(&Board::from_string("X___O____").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::LessonsLearntWinningAttack);
        assert_eq!(mv.cell, Some(8));
    }

    #[test]
    fn test_blocked_one_step_win_falls_through() {
        // O O X on the top row: the one-step win fires with nowhere to write
        let mut agent = agent(&LessonSet::default());
        agent
            .load_board(&Board::from_string("OOX_X____").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::BasicDefense);
        assert_eq!(mv.cell, Some(6));

        agent
            .load_board(&Board::from_string("OOX______").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::RandomAttack);
        assert!([3, 4, 5, 6, 7, 8].contains(&mv.cell.unwrap()));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut agent = agent(&LessonSet::default());
        agent
            .load_board(&Board::from_string("OXOOXXXOO").unwrap())
            .unwrap();
        let mv = agent.get_computer_move().unwrap();
        assert_eq!(mv.kind, MoveKind::NoPossibleMove);
        assert_eq!(mv.cell, None);
        assert_eq!(agent.check().unwrap(), Some(Outcome::Tie));
    }

    #[test]
    fn test_human_moves_and_history() {
        let mut agent = agent(&LessonSet::default());
        agent.start_match(Player::Star).unwrap();
        agent.place_human_move(4).unwrap();
        assert_eq!(agent.record_turn().unwrap(), Some(4));
        assert!(matches!(
            agent.place_human_move(4),
            Err(Error::CellOccupied { position: 4 })
        ));
        assert!(matches!(
            agent.place_human_move(12),
            Err(Error::InvalidPosition { position: 12 })
        ));

        let mv = agent.get_computer_move().unwrap();
        let cell = mv.cell.unwrap();
        assert_ne!(cell, 4);
        assert_eq!(agent.record_turn().unwrap(), Some(cell));
        assert_eq!(agent.history().moves(), &[4, cell]);
        assert_eq!(agent.history().final_board(), agent.board());
        assert_eq!(agent.check().unwrap(), None);
    }

    #[test]
    fn test_outcome_of_board_matches_check() {
        for (board, expected) in [
            ("OOOXX____", Some(Outcome::ComputerVictory)),
            ("XXXOO_O__", Some(Outcome::HumanVictory)),
            ("OXOOXXXOO", Some(Outcome::Tie)),
            ("OX_______", None),
        ] {
            let board = Board::from_string(board).unwrap();
            let mut agent = agent(&LessonSet::default());
            agent.load_board(&board).unwrap();
            assert_eq!(agent.check().unwrap(), expected);
            assert_eq!(Outcome::of_board(&board), expected);
        }
    }
}
