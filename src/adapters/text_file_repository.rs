//! Plain-text implementation of the lesson repository.
//!
//! Each [`LessonKind`] lives in its own file inside one directory, written in
//! the ten-lines-per-rule format of [`crate::lessons::codec`].

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Result,
    error::Error,
    lessons::{LessonKind, Rule, format_rules, parse_rules},
    ports::LessonRepository,
};

/// File names of the three lesson sets, relative to the lessons directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonFiles {
    pub win: String,
    pub tie: String,
    pub not_lose: String,
}

impl Default for LessonFiles {
    fn default() -> Self {
        Self {
            win: "perceptris.lessons_win.txt".to_string(),
            tie: "perceptris.lessons_tie.txt".to_string(),
            not_lose: "perceptris.lessons_not_lose.txt".to_string(),
        }
    }
}

impl LessonFiles {
    pub fn name(&self, kind: LessonKind) -> &str {
        match kind {
            LessonKind::Win => &self.win,
            LessonKind::Tie => &self.tie,
            LessonKind::NotLose => &self.not_lose,
        }
    }
}

/// Text-file lesson repository rooted at one directory.
///
/// # Examples
///
/// ```no_run
/// use perceptris::adapters::TextFileRepository;
/// use perceptris::lessons::LessonKind;
/// use perceptris::ports::LessonRepository;
///
/// let repo = TextFileRepository::new("lessons");
/// let rules = repo.load(LessonKind::Tie)?;
/// repo.save(LessonKind::Tie, &rules)?;
/// # Ok::<(), perceptris::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextFileRepository {
    dir: PathBuf,
    files: LessonFiles,
}

impl TextFileRepository {
    /// Repository using the default file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_files(dir, LessonFiles::default())
    }

    pub fn with_files(dir: impl Into<PathBuf>, files: LessonFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Full path of the file holding `kind`.
    pub fn path(&self, kind: LessonKind) -> PathBuf {
        self.dir.join(self.files.name(kind))
    }
}

impl LessonRepository for TextFileRepository {
    fn load(&self, kind: LessonKind) -> Result<Vec<Rule>> {
        let path = self.path(kind);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                info!(%kind, path = %path.display(), "no lessons file found, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("read lessons file {path:?}"),
                    source,
                });
            }
        };

        let rules = parse_rules(&text, &path)?;
        info!(%kind, path = %path.display(), rules = rules.len(), "loaded lessons");
        Ok(rules)
    }

    fn save(&self, kind: LessonKind, rules: &[Rule]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            operation: format!("create lessons directory {:?}", self.dir),
            source,
        })?;

        let path = self.path(kind);
        fs::write(&path, format_rules(rules)).map_err(|source| Error::Io {
            operation: format!("write lessons file {path:?}"),
            source,
        })?;

        info!(%kind, path = %path.display(), rules = rules.len(), "stored lessons");
        Ok(())
    }
}
