use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Duration;

use super::{SessionId, SessionStore};
use crate::conversation::ApplicationSession;
use crate::error::{Error, Result};
use crate::utils::time::now;

/// In-process session map. Entries expire a fixed TTL after creation and
/// are evicted when next touched.
#[derive(Debug)]
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<SessionId, ApplicationSession>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, ApplicationSession>>> {
        self.sessions
            .lock()
            .map_err(|_| Error::Internal("session store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<ApplicationSession>> {
        let mut sessions = self.sessions()?;
        let current = now();
        sessions.retain(|_, session| !session.is_expired_at(current, self.ttl));
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, id: &SessionId, session: ApplicationSession) -> Result<()> {
        self.sessions()?.insert(id.clone(), session);
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<()> {
        self.sessions()?.remove(id);
        Ok(())
    }
}
