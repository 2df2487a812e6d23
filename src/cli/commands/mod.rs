//! CLI subcommands

pub mod learn;
pub mod lessons;
pub mod play;
pub mod respond;
