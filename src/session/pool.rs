use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::session::QuizSession;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live sessions keyed by id, so a request/response caller can resume a
/// session across calls. Handles are `Arc<Mutex<_>>` to keep two submissions
/// on the same session from interleaving.
#[derive(Default)]
pub struct SessionPool {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<QuizSession>>>>,
    next_id: AtomicU64,
}

impl SessionPool {
    pub fn insert(&self, session: QuizSession) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions
            .write()
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Mutex<QuizSession>>> {
        self.sessions.read().get(&id).cloned()
    }

    pub fn remove(&self, id: SessionId) -> Option<Arc<Mutex<QuizSession>>> {
        self.sessions.write().remove(&id)
    }
}
