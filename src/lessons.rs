//! Lessons: rules mined from finished matches
//!
//! A lesson is a `(pattern, target)` pair. Matches are recorded as a
//! [`MatchHistory`], mined by a [`RuleMiner`] and merged into the stored set
//! with [`merge_rules`].

pub mod codec;
pub mod history;
pub mod miner;
pub mod rule;

pub use codec::{format_rules, parse_rules};
pub use history::MatchHistory;
pub use miner::RuleMiner;
pub use rule::{LessonKind, LessonSet, Rule, merge_rules};
