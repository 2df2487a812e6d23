//! Configuration types for agent creation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, adapters::LessonFiles, lessons::LessonKind, rules::DEFAULT_CAPACITY};

/// Configuration for creating a trained agent.
///
/// # Examples
///
/// ```
/// use perceptris::app::AgentConfig;
///
/// let config = AgentConfig::new()
///     .with_seed(42)
///     .with_capacity(400)
///     .with_lessons_dir("lessons");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of perceptrons, built-in rules and lessons together
    pub capacity: usize,
    /// Directory holding the lesson files
    pub lessons_dir: PathBuf,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Lesson file names inside `lessons_dir`
    pub files: LessonFiles,
}

impl AgentConfig {
    /// Defaults: 300 nodes, lessons in the working directory, no seed.
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            lessons_dir: PathBuf::from("."),
            seed: None,
            files: LessonFiles::default(),
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_lessons_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lessons_dir = dir.into();
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_files(mut self, files: LessonFiles) -> Self {
        self.files = files;
        self
    }

    /// Reject settings no agent can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration {
                message: "capacity must be at least 1".to_string(),
            });
        }
        for kind in LessonKind::ALL {
            if self.files.name(kind).trim().is_empty() {
                return Err(Error::InvalidConfiguration {
                    message: format!("empty file name for {kind} lessons"),
                });
            }
        }
        let names: Vec<&str> = LessonKind::ALL.iter().map(|&k| self.files.name(k)).collect();
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(Error::InvalidConfiguration {
                message: "lesson kinds must be stored in distinct files".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
