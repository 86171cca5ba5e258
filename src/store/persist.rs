use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{auth::User, error::ConfigError};

/// Fixed identifier the session snapshot is stored under.
pub const STORAGE_KEY: &str = "taskmind-auth-storage";

/// The on-disk session record: the user and the authentication flag, nothing
/// else. The busy flag is never persisted, so a restart always begins idle.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snapshot {
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// File-backed storage for the session snapshot: a single JSON document
/// named after [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub(crate) struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub(crate) fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Load the snapshot, falling back to the default state if the file is
    /// absent, unreadable or malformed.
    pub(crate) fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Snapshot::default()
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "discarding session snapshot"
                );
                Snapshot::default()
            }
        }
    }

    fn try_load(&self) -> Result<Snapshot, ConfigError> {
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the snapshot. The caller logs failures; they never propagate
    /// past the store.
    pub(crate) fn store(&self, snapshot: &Snapshot) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(snapshot)?)?;
        Ok(())
    }
}

/// The per-user data directory snapshots go to when the caller doesn't pick
/// one. `None` if the platform has no home directory to anchor it.
pub fn default_state_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "TaskMind", "taskmind")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path());

        assert_eq!(file.load(), Snapshot::default());
    }

    #[test]
    fn test_malformed_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{STORAGE_KEY}.json"));
        fs::write(&path, "{not json").unwrap();

        let file = SnapshotFile::new(dir.path());
        assert_eq!(file.load(), Snapshot::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = SnapshotFile::new(dir.path());

        let snapshot = Snapshot {
            user: Some(User {
                project_id: "proj-1".into(),
                uid: "u1".into(),
                name: "A".into(),
                email: "a@b.com".into(),
                created_time: 1_700_000_000_000,
                last_login_time: 1_700_000_001_000,
            }),
            is_authenticated: true,
        };
        file.store(&snapshot).unwrap();

        assert_eq!(file.load(), snapshot);
    }

    #[test]
    fn test_stray_busy_field_is_ignored() {
        // A crash mid-operation can never leak busy=true into a restart:
        // busy isn't part of the snapshot, and unknown fields are dropped.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("{STORAGE_KEY}.json"));
        fs::write(
            &path,
            serde_json::to_vec(&json!({
                "user": null,
                "isAuthenticated": false,
                "isLoading": true,
            }))
            .unwrap(),
        )
        .unwrap();

        let file = SnapshotFile::new(dir.path());
        assert_eq!(file.load(), Snapshot::default());
    }
}
