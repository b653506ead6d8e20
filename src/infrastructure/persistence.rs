use crate::domain::{SessionPhase, SessionSnapshot, UserIdentity};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, warn};

pub const DEFAULT_SESSION_FILE: &str = "captrack_session.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("session file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("invalid session file {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Keeps the signed-in identity in a JSON file between runs.
#[derive(Debug, Clone)]
pub struct SessionFileStore {
    path: PathBuf,
}

impl SessionFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, identity: &UserIdentity) -> PersistenceResult<()> {
        let json = serde_json::to_string_pretty(identity).map_err(PersistenceError::Serialize)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Reads the stored identity. A missing file is not an error.
    ///
    /// A file that does not parse, including one that is not UTF-8, is deleted before the error is returned, so
    /// the next start begins clean.
    pub fn load(&self) -> PersistenceResult<Option<UserIdentity>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<UserIdentity>(&bytes) {
            Ok(identity) => Ok(Some(identity)),
            Err(source) => {
                if let Err(e) = self.clear() {
                    warn!(path = %self.path.display(), error = %e, "could not remove corrupt session file");
                }
                Err(PersistenceError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }

    pub fn clear(&self) -> PersistenceResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Mirrors a session change to disk: authenticated sessions are saved and
    /// anonymous ones remove the file. Meant to be passed to
    /// `Session::subscribe`.
    pub fn sync(&self, snapshot: &SessionSnapshot) {
        let result = match (snapshot.phase, &snapshot.user) {
            (SessionPhase::Authenticated, Some(user)) => self.save(user),
            (SessionPhase::Anonymous, _) => self.clear(),
            _ => Ok(()),
        };
        if let Err(e) = result {
            error!(path = %self.path.display(), error = %e, "session file update failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ManualClock, Session, SessionConfig};
    use crate::domain::{DemoAccounts, Role};
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let store = SessionFileStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = SessionFileStore::new(dir.path().join("session.json"));
        let admin = DemoAccounts::default().identity(Role::Admin).clone();

        store.save(&admin).unwrap();
        assert_eq!(store.load().unwrap(), Some(admin));
    }

    #[test]
    fn test_corrupt_file_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SessionFileStore::new(&path);

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
        assert!(!path.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_non_utf8_file_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let store = SessionFileStore::new(&path);

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = SessionFileStore::new(dir.path().join("session.json"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_sync_follows_session() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionFileStore::new(&path);
        let mut session = Session::new(SessionConfig::immediate(), ManualClock::new());

        let listener = store.clone();
        session.subscribe(move |snapshot| listener.sync(snapshot));

        session.login("faculty@uc.edu.ph", "faculty123");
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.role, Role::Faculty);

        session.request_logout();
        assert!(path.exists());

        session.confirm_logout();
        assert!(!path.exists());
    }
}
