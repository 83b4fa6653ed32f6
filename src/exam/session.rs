// src/exam/session.rs

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{exam::ExamProfile, question::Question};

/// Sessions older than this are dropped when new ones open.
const SESSION_TTL_HOURS: i64 = 24;

/// An open exam attempt. Holds the answer key, which never leaves the server.
#[derive(Debug, Clone)]
pub struct ExamSession {
    pub id: Uuid,
    pub user_id: String,
    pub profile: ExamProfile,
    pub questions: Vec<Question>,
    pub started_at: DateTime<Utc>,
}

impl ExamSession {
    /// Minutes since the session opened.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> f64 {
        let seconds = (now - self.started_at).num_seconds().max(0);
        (seconds as f64 / 60.0 * 100.0).round() / 100.0
    }
}

/// In-memory registry of open exam sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, ExamSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, user_id: &str, profile: ExamProfile, questions: Vec<Question>) -> Uuid {
        let now = Utc::now();
        let session = ExamSession {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            profile,
            questions,
            started_at: now,
        };
        let id = session.id;

        let mut sessions = self.sessions.write().await;
        let cutoff = now - Duration::hours(SESSION_TTL_HOURS);
        let before = sessions.len();
        sessions.retain(|_, s| s.started_at > cutoff);
        if sessions.len() < before {
            tracing::debug!("Evicted {} stale exam sessions", before - sessions.len());
        }
        sessions.insert(id, session);

        id
    }

    /// Removes and returns the session if it belongs to `user_id`. A session owned by someone
    /// else is left in place. A second call for the same id returns `None`.
    pub async fn take(&self, id: &Uuid, user_id: &str) -> Option<ExamSession> {
        let mut sessions = self.sessions.write().await;
        let owned = sessions.get(id).is_some_and(|s| s.user_id == user_id);
        if owned { sessions.remove(id) } else { None }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    #[cfg(test)]
    async fn backdate(&self, id: &Uuid, hours: i64) {
        if let Some(s) = self.sessions.write().await.get_mut(id) {
            s.started_at -= Duration::hours(hours);
        }
    }
}
