//! In-memory lesson repository for testing.
//!
//! This adapter provides a pure in-memory implementation of LessonRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result,
    lessons::{LessonKind, Rule},
    ports::LessonRepository,
};

/// In-memory repository for testing.
///
/// Rule sets are kept serialized, so a load always hands out a fresh copy.
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<LessonKind, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<LessonKind, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of lesson kinds stored so far.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Check whether `kind` has ever been saved.
    pub fn contains(&self, kind: LessonKind) -> bool {
        self.storage().contains_key(&kind)
    }

    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl LessonRepository for InMemoryRepository {
    fn load(&self, kind: LessonKind) -> Result<Vec<Rule>> {
        match self.storage().get(&kind) {
            Some(bytes) => Ok(serde_json::from_slice(bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, kind: LessonKind, rules: &[Rule]) -> Result<()> {
        let bytes = serde_json::to_vec(rules)?;
        self.storage().insert(kind, bytes);
        Ok(())
    }
}
