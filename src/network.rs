//! Perceptron network primitives
//!
//! A network is a directed weighted graph of threshold nodes. Nodes are never
//! trained; their links are wired by hand (see [`crate::rules`]) and the
//! network is evaluated node by node in a single pass.

pub mod graph;
pub mod node;

pub use graph::{Input, PerceptronNetwork};
pub use node::{Activation, DEFAULT_THRESHOLD, NodeId, ThresholdNode};
