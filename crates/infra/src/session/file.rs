//! Session persisted as a JSON file
//!
//! The file is owner-only on Unix. A missing file is an empty session, and
//! an emptied session removes the file rather than writing `{}`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use moodlog_core::{SessionStore, SessionUpdate};
use moodlog_domain::{ApiError, Result, StoredSession};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::InfraError;

pub struct FileSessionStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<StoredSession> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(InfraError::from(e).into()),
        };

        match serde_json::from_str(&contents) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable session file, starting empty");
                Ok(StoredSession::default())
            }
        }
    }

    async fn write(&self, session: &StoredSession) -> Result<()> {
        if session.is_empty() {
            return self.remove().await;
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(storage)?;
            }
        }

        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| ApiError::Storage(format!("failed to serialize session: {e}")))?;
        tokio::fs::write(&self.path, contents).await.map_err(storage)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions).await.map_err(storage)?;
        }

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage(e)),
        }
    }
}

fn storage(err: std::io::Error) -> ApiError {
    InfraError::from(err).into()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<StoredSession> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn apply(&self, update: SessionUpdate) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut session = self.read().await?;
        update.apply(&mut session);
        self.write(&session).await
    }
}

#[cfg(test)]
mod tests {
    use moodlog_domain::{AccessToken, RefreshToken, Role, UserIdentity};
    use tempfile::TempDir;

    use super::*;

    fn sign_in() -> SessionUpdate {
        SessionUpdate::SignIn {
            access_token: AccessToken::new("a1"),
            refresh_token: Some(RefreshToken::new("r1")),
            user: Some(UserIdentity {
                id: "u1".into(),
                email: "ana@example.com".into(),
                name: None,
                role: Some(Role::Premium),
            }),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path).apply(sign_in()).await.unwrap();

        let reopened = FileSessionStore::new(&path);
        let session = reopened.load().await.unwrap();
        assert_eq!(session.access_token, Some(AccessToken::new("a1")));
        assert_eq!(session.role, Some(Role::Premium));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"refreshToken\""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path).apply(sign_in()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_clear_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store.apply(sign_in()).await.unwrap();
        assert!(path.exists());

        store.apply(SessionUpdate::Clear).await.unwrap();
        assert!(!path.exists());

        store.apply(SessionUpdate::Clear).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().await.unwrap().is_empty());
    }
}
