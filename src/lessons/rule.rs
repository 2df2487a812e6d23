//! Mined pattern -> move rules and the sets they are stored in

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::BOARD_CELLS};

/// "When the cells weighted by `pattern` sum above the threshold, play `target`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: [f64; BOARD_CELLS],
    pub target: usize,
}

impl Rule {
    pub fn new(pattern: [f64; BOARD_CELLS], target: usize) -> Self {
        Self { pattern, target }
    }

    /// Fails unless `target` names a board cell.
    pub fn validate(&self) -> Result<()> {
        if self.target >= BOARD_CELLS {
            return Err(Error::InvalidLessonTarget {
                target: self.target,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, weight) in self.pattern.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{weight:+.3}")?;
        }
        write!(f, "] -> {}", self.target)
    }
}

/// Category a rule was mined for, one persisted set each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Win,
    Tie,
    NotLose,
}

impl LessonKind {
    pub const ALL: [LessonKind; 3] = [LessonKind::Win, LessonKind::Tie, LessonKind::NotLose];

    pub fn as_str(self) -> &'static str {
        match self {
            LessonKind::Win => "win",
            LessonKind::Tie => "tie",
            LessonKind::NotLose => "not_lose",
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three rule sets an agent is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LessonSet {
    pub win: Vec<Rule>,
    pub tie: Vec<Rule>,
    pub not_lose: Vec<Rule>,
}

impl LessonSet {
    pub fn get(&self, kind: LessonKind) -> &[Rule] {
        match kind {
            LessonKind::Win => &self.win,
            LessonKind::Tie => &self.tie,
            LessonKind::NotLose => &self.not_lose,
        }
    }

    pub fn set(&mut self, kind: LessonKind, rules: Vec<Rule>) {
        match kind {
            LessonKind::Win => self.win = rules,
            LessonKind::Tie => self.tie = rules,
            LessonKind::NotLose => self.not_lose = rules,
        }
    }

    pub fn total(&self) -> usize {
        self.win.len() + self.tie.len() + self.not_lose.len()
    }
}

/// Append the mined rules that are not already present, comparing by exact
/// equality. Returns the merged set and the number of rules added.
pub fn merge_rules(existing: Vec<Rule>, mined: impl IntoIterator<Item = Rule>) -> (Vec<Rule>, usize) {
    let mut merged = existing;
    let before = merged.len();
    for rule in mined {
        if !merged.contains(&rule) {
            merged.push(rule);
        }
    }
    let added = merged.len() - before;
    (merged, added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(first: f64, target: usize) -> Rule {
        let mut pattern = [0.0; BOARD_CELLS];
        pattern[0] = first;
        Rule::new(pattern, target)
    }

    #[test]
    fn test_merge_skips_known_and_repeated_rules() {
        let existing = vec![rule(1.0, 2)];
        let mined = vec![rule(1.0, 2), rule(0.5, 3), rule(0.5, 3)];
        let (merged, added) = merge_rules(existing, mined);
        assert_eq!(added, 1);
        assert_eq!(merged, vec![rule(1.0, 2), rule(0.5, 3)]);
    }

    #[test]
    fn test_merge_keeps_order() {
        let (merged, added) = merge_rules(vec![rule(1.0, 4)], vec![rule(-1.0, 0), rule(1.0, 5)]);
        assert_eq!(added, 2);
        assert_eq!(merged.iter().map(|r| r.target).collect::<Vec<_>>(), vec![4, 0, 5]);
    }

    #[test]
    fn test_same_pattern_different_target_is_distinct() {
        let (_, added) = merge_rules(vec![rule(1.0, 4)], vec![rule(1.0, 5)]);
        assert_eq!(added, 1);
    }

    #[test]
    fn test_target_must_be_a_board_cell() {
        assert!(rule(1.0, 8).validate().is_ok());
        let err = rule(1.0, 9).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidLessonTarget { target: 9 }));
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_lesson_set_access() {
        let mut set = LessonSet::default();
        set.set(LessonKind::Tie, vec![rule(1.0, 1)]);
        assert_eq!(set.get(LessonKind::Tie).len(), 1);
        assert!(set.get(LessonKind::Win).is_empty());
        assert_eq!(set.total(), 1);
        assert_eq!(LessonKind::NotLose.to_string(), "not_lose");
    }
}
