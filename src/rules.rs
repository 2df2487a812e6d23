//! Built-in tic-tac-toe rules wired as a perceptron network
//!
//! Node layout of a freshly built [`RuleNetwork`]:
//!
//! | Stage             | Nodes | Weight into the detector |
//! |-------------------|-------|--------------------------|
//! | board cells       | 9     | self-link 2.0            |
//! | computer victory  | 1 + 8 | +1/3 per cell            |
//! | one-step defense  | 1 + 24 | -1/2 per cell           |
//! | one-step win      | 1 + 24 | +1/2 per cell           |
//! | human victory     | 1 + 8 | -1/3 per cell            |
//! | random attack     | 9     | +1 from the cell, bias 1 |
//! | tie               | 43    | majority counters        |

pub mod detector;
pub mod evaluator;

pub use detector::{CELL_SELF_WEIGHT, DetectorGroup};
pub use evaluator::{DEFAULT_CAPACITY, Group, Response, RuleNetwork, Situation};
