//! Dependency injection container for the perceptris application.
//!
//! The container owns the lesson repository and provides factory methods for
//! the agent, the bare rule evaluator and the learning use case.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::{InMemoryRepository, TextFileRepository},
    agent::{Outcome, TrainedAgent},
    lessons::{LessonKind, MatchHistory, Rule, RuleMiner, merge_rules},
    ports::LessonRepository,
    rules::RuleNetwork,
};

/// What one learning pass did to one lesson set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LessonUpdate {
    pub kind: LessonKind,
    /// Rules produced by the miner
    pub mined: usize,
    /// Rules not already stored
    pub added: usize,
    /// Size of the stored set afterwards
    pub total: usize,
}

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use perceptris::app::{AgentConfig, App};
///
/// let config = AgentConfig::new().with_lessons_dir("lessons");
/// let app = App::from_config(&config);
/// let agent = app.create_agent(&config)?;
/// # Ok::<(), perceptris::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use perceptris::adapters::InMemoryRepository;
/// use perceptris::app::{AgentConfig, App};
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// let agent = app.create_agent(&AgentConfig::new())?;
/// # Ok::<(), perceptris::Error>(())
/// ```
pub struct App {
    /// Repository for lesson persistence
    lesson_repository: Arc<dyn LessonRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Text-file lessons in the working directory, no default seed.
    pub fn new() -> Self {
        Self::from_config(&AgentConfig::default())
    }

    /// Text-file lessons where `config` says, seeded with `config.seed`.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            lesson_repository: Arc::new(TextFileRepository::with_files(
                config.lessons_dir.clone(),
                config.files.clone(),
            )),
            default_seed: config.seed,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the lesson repository.
    pub fn lesson_repository(&self) -> Arc<dyn LessonRepository + Send + Sync> {
        Arc::clone(&self.lesson_repository)
    }

    /// Built-in rules only, no lessons loaded.
    pub fn create_rules(&self, config: &AgentConfig) -> Result<RuleNetwork> {
        config.validate()?;
        RuleNetwork::with_capacity(config.capacity, config.seed.or(self.default_seed))
    }

    /// Built-in rules extended with every stored lesson.
    pub fn create_agent(&self, config: &AgentConfig) -> Result<TrainedAgent> {
        let core = self.create_rules(config)?;
        let lessons = self.lesson_repository.load_all()?;
        TrainedAgent::new(core, &lessons)
    }

    pub fn lessons(&self, kind: LessonKind) -> Result<Vec<Rule>> {
        self.lesson_repository.load(kind)
    }

    /// Mine a finished match and merge the result into the stored sets.
    ///
    /// A decided match teaches the winner's moves as win lessons and the
    /// loser's moves as not-lose lessons; a tie teaches tie lessons. Each
    /// stored set is rewritten with the merged rules.
    pub fn learn_from_match(
        &self,
        history: &MatchHistory,
        outcome: Outcome,
    ) -> Result<Vec<LessonUpdate>> {
        let plan = match outcome {
            Outcome::ComputerVictory | Outcome::HumanVictory => vec![
                (LessonKind::Win, history.winner_perspective()),
                (LessonKind::NotLose, history.loser_perspective()),
            ],
            Outcome::Tie => vec![(LessonKind::Tie, history.clone())],
        };

        let mut miner = RuleMiner::new(self.default_seed)?;
        let mut updates = Vec::with_capacity(plan.len());
        for (kind, perspective) in plan {
            let mined = miner.mine(&perspective, kind)?;
            let existing = self.lesson_repository.load(kind)?;
            let mined_count = mined.len();
            let (merged, added) = merge_rules(existing, mined);
            self.lesson_repository.save(kind, &merged)?;

            info!(%kind, mined = mined_count, added, total = merged.len(), "lessons updated");
            updates.push(LessonUpdate {
                kind,
                mined: mined_count,
                added,
                total: merged.len(),
            });
        }
        Ok(updates)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// # Examples
///
/// ```
/// use perceptris::adapters::InMemoryRepository;
/// use perceptris::app::AppBuilder;
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct AppBuilder {
    lesson_repository: Option<Arc<dyn LessonRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            lesson_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom lesson repository.
    pub fn with_repository<R: LessonRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.lesson_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for everything created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, an empty `InMemoryRepository` is used.
    pub fn build(self) -> App {
        App {
            lesson_repository: self
                .lesson_repository
                .unwrap_or_else(|| Arc::new(InMemoryRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn test_app_creates_agent() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app.create_agent(&AgentConfig::new()).unwrap();
        assert_eq!(agent.lesson_count(LessonKind::Win), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let app = App::for_testing().build();
        assert!(app.create_agent(&AgentConfig::new().with_capacity(0)).is_err());
    }

    #[test]
    fn test_learning_a_win_feeds_the_next_agent() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing()
            .with_repository(repo.clone())
            .with_default_seed(5)
            .build();

        // O0 X1 O4 X2 O8
        let history = MatchHistory::from_moves(Player::Circle, [0, 1, 4, 2, 8]).unwrap();
        let updates = app
            .learn_from_match(&history, Outcome::ComputerVictory)
            .unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].kind, LessonKind::Win);
        assert_eq!(updates[0].added, 2);
        assert_eq!(updates[1].kind, LessonKind::NotLose);
        assert!(repo.contains(LessonKind::NotLose));
        assert!(!repo.contains(LessonKind::Tie));

        let agent = app.create_agent(&AgentConfig::new()).unwrap();
        assert_eq!(agent.lesson_count(LessonKind::Win), 2);
    }

    #[test]
    fn test_learning_twice_adds_nothing() {
        let app = App::for_testing().with_default_seed(1).build();
        let history =
            MatchHistory::from_moves(Player::Circle, [0, 4, 8, 1, 7, 6, 2, 5, 3]).unwrap();
        let first = app.learn_from_match(&history, Outcome::Tie).unwrap();
        assert_eq!(first[0].added, 2);
        let second = app.learn_from_match(&history, Outcome::Tie).unwrap();
        assert_eq!(second[0].added, 0);
        assert_eq!(second[0].total, 2);
    }
}
