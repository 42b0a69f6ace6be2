use async_trait::async_trait;
use moodlog_core::{SessionStore, SessionUpdate};
use moodlog_domain::{Result, StoredSession};
use parking_lot::Mutex;

/// Process-local session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<StoredSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing session, e.g. one restored by the caller
    pub fn with_session(session: StoredSession) -> Self {
        Self { session: Mutex::new(session) }
    }

    pub fn snapshot(&self) -> StoredSession {
        self.session.lock().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.snapshot())
    }

    async fn apply(&self, update: SessionUpdate) -> Result<()> {
        update.apply(&mut self.session.lock());
        Ok(())
    }
}
