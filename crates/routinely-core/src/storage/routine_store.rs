//! JSON file persistence for generated routines.
//!
//! Layout: `<root>/routines/<user-key>/<YYYY-MM-DD>.json`, one routine per
//! user per day. The user key is a UUID v5 of the user id, so distinct ids
//! never share a directory. Saving the same day again replaces the file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use super::data_dir;
use crate::collaborators::RoutineStore;
use crate::error::Result;
use crate::routine::DailyRoutine;

pub struct FileRoutineStore {
    root: PathBuf,
}

impl FileRoutineStore {
    /// Store rooted at `root` (the `routines/` directory lives beneath it).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the application data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self> {
        Ok(Self::new(data_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user_id: &str) -> PathBuf {
        let key = Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("user/{user_id}").as_bytes());
        self.root.join("routines").join(key.to_string())
    }

    fn routine_path(&self, user_id: &str, date: NaiveDate) -> PathBuf {
        self.user_dir(user_id)
            .join(format!("{}.json", date.format("%Y-%m-%d")))
    }
}

impl RoutineStore for FileRoutineStore {
    fn save(&self, routine: &DailyRoutine) -> Result<()> {
        let path = self.routine_path(&routine.user_id, routine.date);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(routine)?;
        std::fs::write(&path, json)?;
        tracing::debug!(path = %path.display(), "routine saved");
        Ok(())
    }

    fn load(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyRoutine>> {
        let path = self.routine_path(user_id, date);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
