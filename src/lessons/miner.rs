//! Rule induction from finished matches
//!
//! The miner replays a match from the perspective of the side labelled
//! CIRCLE and asks a built-in [`RuleNetwork`] what it would have done before
//! each of CIRCLE's moves. Where the built-in rules had nothing confident to
//! say, the move actually played becomes a new rule (win and tie), or a rule
//! steering away from it (not-lose).

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::{debug, info};

use super::{
    history::MatchHistory,
    rule::{LessonKind, Rule},
};
use crate::{
    Error, Result,
    rules::{DEFAULT_CAPACITY, RuleNetwork, Situation},
    tictactoe::{BOARD_CELLS, Board, Cell, Player},
};

/// Per-cell weights and newly occupied cells between two consecutive boards.
struct Transition {
    pattern: [f64; BOARD_CELLS],
    new_cells: Vec<usize>,
}

impl Transition {
    /// Unchanged stones weigh `±1/n` (n = number of unchanged stones), unchanged
    /// EMPTY cells weigh 0. A stone that changes or disappears is an error.
    fn between(from: &Board, to: &Board) -> Result<Self> {
        let unchanged = (0..BOARD_CELLS)
            .filter(|&pos| !from.is_empty(pos) && from.get(pos) == to.get(pos))
            .count();

        let mut pattern = [0.0; BOARD_CELLS];
        let mut new_cells = Vec::new();
        for pos in 0..BOARD_CELLS {
            match (from.get(pos), to.get(pos)) {
                (Cell::Circle, Cell::Circle) => pattern[pos] = 1.0 / unchanged as f64,
                (Cell::Star, Cell::Star) => pattern[pos] = -1.0 / unchanged as f64,
                (Cell::Empty, Cell::Empty) => pattern[pos] = 0.0,
                (Cell::Empty, _) => new_cells.push(pos),
                (before, after) => {
                    return Err(Error::InconsistentTransition {
                        cell: pos,
                        from: before.to_string(),
                        to: after.to_string(),
                    });
                }
            }
        }
        Ok(Self { pattern, new_cells })
    }
}

/// Mines [`Rule`]s from a [`MatchHistory`].
#[derive(Debug)]
pub struct RuleMiner {
    evaluator: RuleNetwork,
    rng: StdRng,
}

impl RuleMiner {
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let evaluator = RuleNetwork::with_rng(DEFAULT_CAPACITY, StdRng::from_rng(&mut rng))?;
        Ok(Self::with_evaluator(evaluator, rng))
    }

    pub fn with_evaluator(evaluator: RuleNetwork, rng: StdRng) -> Self {
        Self { evaluator, rng }
    }

    /// Mine `history` for `kind`. The history must already be labelled from
    /// the perspective being learnt (see [`MatchHistory::winner_perspective`]).
    pub fn mine(&mut self, history: &MatchHistory, kind: LessonKind) -> Result<Vec<Rule>> {
        let rules = match kind {
            LessonKind::Win | LessonKind::Tie => self.analyze_win_or_tie(history, kind)?,
            LessonKind::NotLose => self.analyze_loss(history)?,
        };
        info!(%kind, %history, mined = rules.len(), "mined lessons");
        Ok(rules)
    }

    /// Indices of CIRCLE's moves: odd when CIRCLE started, even otherwise.
    fn circle_turns(history: &MatchHistory) -> impl Iterator<Item = usize> {
        let start = match history.first_mover() {
            Player::Circle => 1,
            Player::Star => 2,
        };
        (start..BOARD_CELLS).step_by(2)
    }

    fn require_final(
        &mut self,
        history: &MatchHistory,
        kind: LessonKind,
        accept: impl Fn(Situation) -> bool,
    ) -> Result<()> {
        let situation = self.evaluator.respond(&history.final_board())?.situation;
        if accept(situation) {
            Ok(())
        } else {
            Err(Error::UnexpectedClassification {
                kind: kind.to_string(),
                got: situation.to_string(),
            })
        }
    }

    /// Learn CIRCLE's moves wherever the built-in rules would only have
    /// played at random (or not at all).
    pub fn analyze_win_or_tie(&mut self, history: &MatchHistory, kind: LessonKind) -> Result<Vec<Rule>> {
        self.require_final(history, kind, Situation::is_conclusive)?;

        let mut rules = Vec::new();
        for idx in Self::circle_turns(history) {
            let from = history.board_after(idx - 1);
            let to = history.board_after(idx);
            let situation = self.evaluator.respond(&from)?.situation;
            if !matches!(situation, Situation::UnableToRespond | Situation::RandomAttack) {
                debug!(idx, %situation, "covered by built-in rules");
                continue;
            }

            let transition = Transition::between(&from, &to)?;
            let [target] = transition.new_cells[..] else {
                return Err(Error::MissingDestination {
                    from: from.encode(),
                    to: to.encode(),
                });
            };
            rules.push(Rule::new(transition.pattern, target));
        }
        Ok(rules)
    }

    /// Learn to deviate from CIRCLE's moves that the built-in rules would have
    /// repeated (or only guessed at) in a lost match.
    pub fn analyze_loss(&mut self, history: &MatchHistory) -> Result<Vec<Rule>> {
        self.require_final(history, LessonKind::NotLose, |s| s == Situation::HumanVictory)?;

        let mut rules = Vec::new();
        for idx in Self::circle_turns(history) {
            let from = history.board_after(idx - 1);
            let to = history.board_after(idx);
            let predicted = self.evaluator.respond(&from)?;
            if predicted.to != to && predicted.situation != Situation::RandomAttack {
                continue;
            }

            let transition = Transition::between(&from, &to)?;
            let Some(&played) = transition.new_cells.last() else {
                continue;
            };
            let alternatives: Vec<usize> = from
                .empty_positions()
                .into_iter()
                .filter(|&pos| pos != played)
                .collect();
            if let Some(&target) = alternatives.choose(&mut self.rng) {
                debug!(idx, played, target, "deviation learnt");
                rules.push(Rule::new(transition.pattern, target));
            }
        }
        Ok(rules)
    }
}
