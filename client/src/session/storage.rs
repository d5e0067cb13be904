//! Durable persistence of the session record.

use chrono::{DateTime, Utc};
use protocol::UserProfile;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

pub const SESSION_FILE_PATH: &str = "./session.yaml";

/// On-disk shape of a session. Token and user are always written together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: String,
    pub user: UserProfile,
    pub saved_at: DateTime<Utc>,
}

impl PersistedSession {
    pub fn new(token: String, user: UserProfile) -> Self {
        Self {
            token,
            user,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read session file: {0}")]
    Read(std::io::Error),
    #[error("failed to write session file: {0}")]
    Write(std::io::Error),
    #[error("failed to remove session file: {0}")]
    Remove(std::io::Error),
    #[error("failed to decode YAML session: {0}")]
    Deserialize(serde_yaml::Error),
    #[error("failed to encode YAML session: {0}")]
    Serialize(serde_yaml::Error),
}

/// Key-value persistence for the one session record.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;
    fn save(&self, session: &PersistedSession) -> Result<(), StorageError>;
    /// Removing an absent record succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

/// YAML file storage.
///
/// Saves go through a sibling temporary file and a rename, so a reader never
/// sees a half-written record.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "session.yaml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Writes `contents` to a fresh file readable only by the owner. The record
/// holds a bearer token.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl Default for FileSessionStorage {
    fn default() -> Self {
        Self::new(SESSION_FILE_PATH)
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Read(err)),
        };

        serde_yaml::from_str::<PersistedSession>(&raw)
            .map(Some)
            .map_err(StorageError::Deserialize)
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        let encoded = serde_yaml::to_string(session).map_err(StorageError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StorageError::Write)?;
        }

        let temp = self.temp_path();
        if let Err(err) = write_private(&temp, encoded.as_bytes()) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Write(err));
        }

        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::Write(err));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Remove(err)),
        }
    }
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded as if a previous run had logged in.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &PersistedSession) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
