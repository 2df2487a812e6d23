//! Ports (trait boundaries) for external dependencies.
//!
//! The agent core never touches the file system or the terminal directly;
//! lesson storage and the human player are reached through these traits and
//! implemented by the adapters module.

pub mod interaction;
pub mod repository;

pub use interaction::Interaction;
pub use repository::LessonRepository;
