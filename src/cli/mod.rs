//! CLI infrastructure for the perceptris agent
//!
//! Subcommands to play an interactive match, evaluate a single board, teach
//! the agent a match given on the command line and inspect stored lessons.

pub mod commands;
pub mod config;
pub mod output;
