//! File-backed session store

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Session;
use crate::store::{SessionStore, StoreError, STORAGE_KEY};

/// Session store keeping one JSON file under a data directory.
///
/// The file plays the role browser local storage played in the original
/// application: `<dir>/user.json` holds the serialized [`Session`].
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write, so constructing a
    /// store never touches the filesystem.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{STORAGE_KEY}.json")),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "stored session is malformed, treating as absent");
                None
            }
        }
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
