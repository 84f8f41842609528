//! Publish Journal Repositories
//!
//! `TomlJournalRepository` persists unfinished publishes at
//! `<project>/.gantry/publish.lock`; `InMemoryJournal` keeps them for the
//! lifetime of the process.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::entities::PublishProgress;
use crate::domain::ports::{JournalError, JournalResult, PublishJournal};

pub const JOURNAL_PATH: &str = ".gantry/publish.lock";

const JOURNAL_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlJournal {
    version: u32,
    #[serde(default)]
    functions: BTreeMap<String, PublishProgress>,
}

impl Default for TomlJournal {
    fn default() -> Self {
        Self {
            version: JOURNAL_VERSION,
            functions: BTreeMap::new(),
        }
    }
}

fn access(e: impl std::fmt::Display) -> JournalError {
    JournalError::Access {
        message: e.to_string(),
    }
}

pub struct TomlJournalRepository {
    path: PathBuf,
}

impl TomlJournalRepository {
    /// Journal of the project rooted at `root`
    pub fn for_project(root: &Path) -> Self {
        Self {
            path: root.join(JOURNAL_PATH),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard_path(&self) -> PathBuf {
        self.path.with_extension("guard")
    }

    fn load_from_disk(&self) -> JournalResult<TomlJournal> {
        if !self.path.exists() {
            return Ok(TomlJournal::default());
        }

        let content = fs::read_to_string(&self.path).map_err(access)?;
        toml::from_str(&content).map_err(|e| JournalError::Corrupted {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Replace the journal file atomically; an empty journal removes it
    fn save_to_disk(&self, journal: &TomlJournal) -> JournalResult<()> {
        if journal.functions.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(access)?;
            }
            return Ok(());
        }

        let content =
            toml::to_string_pretty(journal).map_err(|e| JournalError::Serialization {
                message: e.to_string(),
            })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(access)?;
        tmp.write_all(content.as_bytes()).map_err(access)?;
        tmp.persist(&self.path).map_err(|e| access(e.error))?;
        Ok(())
    }

    /// Run `f` holding the guard file lock, shared for reads and exclusive
    /// for writes
    fn locked<T>(&self, exclusive: bool, f: impl FnOnce() -> JournalResult<T>) -> JournalResult<T> {
        let guard = self.guard_path();
        if let Some(parent) = guard.parent() {
            fs::create_dir_all(parent).map_err(access)?;
        }

        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&guard)
            .map_err(access)?;
        if exclusive {
            lock_file.lock_exclusive().map_err(access)?;
        } else {
            lock_file.lock_shared().map_err(access)?;
        }

        let result = f();

        let _ = lock_file.unlock();
        result
    }

    /// Run `f` on the loaded journal under an exclusive lock, then save it
    fn modify(&self, f: impl FnOnce(&mut TomlJournal)) -> JournalResult<()> {
        self.locked(true, || {
            let mut journal = self.load_from_disk()?;
            f(&mut journal);
            self.save_to_disk(&journal)
        })
    }
}

impl PublishJournal for TomlJournalRepository {
    fn pending(&self, function: &str) -> JournalResult<Option<PublishProgress>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let journal = self.locked(false, || self.load_from_disk())?;
        Ok(journal
            .functions
            .get(function)
            .filter(|p| !p.is_complete())
            .cloned())
    }

    fn record(&self, progress: &PublishProgress) -> JournalResult<()> {
        self.modify(|journal| {
            journal
                .functions
                .insert(progress.function.clone(), progress.clone());
        })
    }

    fn clear(&self, function: &str) -> JournalResult<()> {
        self.modify(|journal| {
            journal.functions.remove(function);
        })
    }
}

/// Process-local journal
#[derive(Default)]
pub struct InMemoryJournal {
    entries: Mutex<BTreeMap<String, PublishProgress>>,
    failing: bool,
}

impl InMemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal whose every operation fails
    pub fn failing() -> Self {
        Self {
            entries: Mutex::default(),
            failing: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> JournalResult<std::sync::MutexGuard<'_, BTreeMap<String, PublishProgress>>> {
        if self.failing {
            return Err(access("journal unavailable"));
        }
        self.entries.lock().map_err(access)
    }
}

impl PublishJournal for InMemoryJournal {
    fn pending(&self, function: &str) -> JournalResult<Option<PublishProgress>> {
        Ok(self
            .entries()?
            .get(function)
            .filter(|p| !p.is_complete())
            .cloned())
    }

    fn record(&self, progress: &PublishProgress) -> JournalResult<()> {
        self.entries()?
            .insert(progress.function.clone(), progress.clone());
        Ok(())
    }

    fn clear(&self, function: &str) -> JournalResult<()> {
        self.entries()?.remove(function);
        Ok(())
    }
}
