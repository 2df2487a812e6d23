//! perceptris: a tic-tac-toe agent built on a hand-wired perceptron network
//!
//! This crate provides:
//! - A fixed-capacity threshold-perceptron network with weighted links and biases
//! - Built-in detector groups that recognise wins, ties and one-step threats
//! - A rule evaluator that classifies a board and plays the agent's answer
//! - Lesson mining from finished matches, persisted as plain text
//! - A trained agent that layers mined lessons over the built-in rules
//! - Interactive and scripted match sessions

pub mod adapters;
pub mod agent;
pub mod app;
pub mod cli;
pub mod error;
pub mod lessons;
pub mod network;
pub mod ports;
pub mod rules;
pub mod session;
pub mod tictactoe;

pub use agent::{ComputerMove, MoveKind, Outcome, TrainedAgent};
pub use error::{Error, Result};
pub use lessons::{LessonKind, LessonSet, MatchHistory, Rule, RuleMiner};
pub use rules::{Response, RuleNetwork, Situation};
pub use session::{GameSession, SessionSummary};
pub use tictactoe::{Board, Cell, Player};
