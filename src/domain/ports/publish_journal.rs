//! PublishJournal port - persistence of publish progress
//!
//! A publish that fails after its compute unit was created leaves a journal
//! entry behind. The next publish of that function finds it and resumes
//! routing from the recorded stage.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::PublishProgress;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal {path} is corrupted: {message}")]
    Corrupted { path: PathBuf, message: String },

    #[error("journal access failed: {message}")]
    Access { message: String },

    #[error("journal serialization failed: {message}")]
    Serialization { message: String },
}

pub trait PublishJournal {
    /// Unfinished progress for `function`, if any
    fn pending(&self, function: &str) -> JournalResult<Option<PublishProgress>>;

    /// Record (or replace) the progress of a function
    fn record(&self, progress: &PublishProgress) -> JournalResult<()>;

    /// Forget a function's progress
    fn clear(&self, function: &str) -> JournalResult<()>;
}

impl<T: PublishJournal + ?Sized> PublishJournal for &T {
    fn pending(&self, function: &str) -> JournalResult<Option<PublishProgress>> {
        (**self).pending(function)
    }

    fn record(&self, progress: &PublishProgress) -> JournalResult<()> {
        (**self).record(progress)
    }

    fn clear(&self, function: &str) -> JournalResult<()> {
        (**self).clear(function)
    }
}
