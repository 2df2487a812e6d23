//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits in [`crate::ports`]: lesson
//! storage (plain-text files or memory) and the human side of a game
//! (terminal or a fixed script).

pub mod in_memory_repository;
pub mod scripted;
pub mod terminal;
pub mod text_file_repository;

pub use in_memory_repository::InMemoryRepository;
pub use scripted::ScriptedInteraction;
pub use terminal::TerminalInteraction;
pub use text_file_repository::{LessonFiles, TextFileRepository};
