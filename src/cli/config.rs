//! Shared configuration types for CLI commands

use std::path::PathBuf;

use clap::Args;

use crate::{app::AgentConfig, rules::DEFAULT_CAPACITY};

/// Options every command accepts
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory holding the lesson files
    #[arg(long, default_value = ".")]
    pub lessons_dir: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of perceptrons in the network
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,
}

impl CommonArgs {
    pub fn agent_config(&self) -> AgentConfig {
        let mut config = AgentConfig::new()
            .with_lessons_dir(self.lessons_dir.clone())
            .with_capacity(self.capacity);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_defaults_map_to_agent_config() {
        let harness = Harness::parse_from(["perceptris"]);
        assert_eq!(harness.common.agent_config(), AgentConfig::new());
    }

    #[test]
    fn test_flags_map_to_agent_config() {
        let harness = Harness::parse_from([
            "perceptris",
            "--lessons-dir",
            "kb",
            "--seed",
            "7",
            "--capacity",
            "500",
        ]);
        let config = harness.common.agent_config();
        assert_eq!(config.lessons_dir, PathBuf::from("kb"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.capacity, 500);
    }
}
