//! Repository port for lesson persistence.

use crate::{
    Result,
    lessons::{LessonKind, LessonSet, Rule},
};

/// Port for loading and storing the rule set of each [`LessonKind`].
///
/// # Examples
///
/// ```
/// use perceptris::adapters::InMemoryRepository;
/// use perceptris::lessons::{LessonKind, Rule};
/// use perceptris::ports::LessonRepository;
///
/// let repo = InMemoryRepository::new();
/// assert!(repo.load(LessonKind::Win)?.is_empty());
///
/// repo.save(LessonKind::Win, &[Rule::new([0.0; 9], 4)])?;
/// assert_eq!(repo.load(LessonKind::Win)?.len(), 1);
/// # Ok::<(), perceptris::Error>(())
/// ```
pub trait LessonRepository {
    /// Load the stored rules of `kind`. A store that was never written is an
    /// empty set, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self, kind: LessonKind) -> Result<Vec<Rule>>;

    /// Replace the stored rules of `kind` with `rules`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save(&self, kind: LessonKind, rules: &[Rule]) -> Result<()>;

    /// Load all three sets.
    fn load_all(&self) -> Result<LessonSet> {
        let mut lessons = LessonSet::default();
        for kind in LessonKind::ALL {
            lessons.set(kind, self.load(kind)?);
        }
        Ok(lessons)
    }
}
