// src/store/memory.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{
    LIST_LIMIT, NotificationStore, ResultStore, StoreError, UpdateStore, broadcast_for,
};
use crate::models::{
    exam_record::{ExamResult, NewExamResult},
    notification::Notification,
    update::{CreateUpdateRequest, Update},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    next_id: i64,
    results: Vec<ExamResult>,
    updates: Vec<Update>,
    notifications: Vec<Notification>,
}

impl Snapshot {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory store, optionally mirrored to a JSON snapshot file after every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Snapshot>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the snapshot at `path` if it exists; later writes are persisted there.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!("Fallback store loaded from {}", path.display());

        Ok(Self {
            data: RwLock::new(data),
            snapshot_path: Some(path),
        })
    }

    /// Writes `next` to the snapshot file, then installs it. On error the current state is kept.
    async fn commit(&self, data: &mut Snapshot, next: Snapshot) -> Result<(), StoreError> {
        self.persist(&next).await?;
        *data = next;
        Ok(())
    }

    async fn persist(&self, data: &Snapshot) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(data)?;
        let tmp = tmp_path(path);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn visible_to(n: &Notification, user_id: &str) -> bool {
    n.user_id.as_deref().is_none_or(|owner| owner == user_id)
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn insert_result(&self, result: NewExamResult) -> Result<ExamResult, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let row = ExamResult {
            id: next.next_id(),
            user_id: result.user_id,
            exam_id: result.exam_id,
            subject: result.subject,
            difficulty: result.difficulty,
            score: result.score,
            correct: result.correct,
            total: result.total,
            passed: result.passed,
            time_taken_minutes: result.time_taken_minutes,
            suggestions: result.suggestions,
            created_at: Utc::now(),
        };
        next.results.push(row.clone());
        self.commit(&mut data, next).await?;
        Ok(row)
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ExamResult>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .results
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .take(LIST_LIMIT as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UpdateStore for MemoryStore {
    async fn list_updates(&self) -> Result<Vec<Update>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .updates
            .iter()
            .rev()
            .take(LIST_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn publish_update(&self, update: &CreateUpdateRequest) -> Result<Update, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let now = Utc::now();

        let row = Update {
            id: next.next_id(),
            title: update.title.clone(),
            content: update.content.clone(),
            author: update.author.clone(),
            category: update.category.clone(),
            created_at: now,
        };
        let (title, message) = broadcast_for(update);
        let notification = Notification {
            id: next.next_id(),
            user_id: None,
            title,
            message,
            is_read: false,
            created_at: now,
        };

        next.updates.push(row.clone());
        next.notifications.push(notification);
        self.commit(&mut data, next).await?;
        Ok(row)
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .notifications
            .iter()
            .rev()
            .filter(|n| visible_to(n, user_id))
            .take(LIST_LIMIT as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: i64) -> Result<Option<Notification>, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let Some(notification) = next.notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        notification.is_read = true;
        let notification = notification.clone();
        self.commit(&mut data, next).await?;
        Ok(Some(notification))
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<u64, StoreError> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let mut changed = 0;
        for n in next
            .notifications
            .iter_mut()
            .filter(|n| !n.is_read && visible_to(n, user_id))
        {
            n.is_read = true;
            changed += 1;
        }
        if changed > 0 {
            self.commit(&mut data, next).await?;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_result(user_id: &str, score: i32) -> NewExamResult {
        NewExamResult {
            user_id: user_id.to_string(),
            exam_id: "default-1".to_string(),
            subject: "general".to_string(),
            difficulty: "easy".to_string(),
            score,
            correct: score / 10,
            total: 10,
            passed: score >= 60,
            time_taken_minutes: 4.5,
            suggestions: "Keep going".to_string(),
        }
    }

    fn update(title: &str) -> CreateUpdateRequest {
        CreateUpdateRequest {
            title: title.to_string(),
            content: "Body".to_string(),
            author: Some("team".to_string()),
            category: None,
        }
    }

    #[tokio::test]
    async fn test_history_is_per_user_newest_first() {
        let store = MemoryStore::new();
        store.insert_result(new_result("u1", 40)).await.unwrap();
        store.insert_result(new_result("u2", 90)).await.unwrap();
        store.insert_result(new_result("u1", 70)).await.unwrap();

        let history = store.history("u1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].score, 70);
        assert_eq!(history[1].score, 40);
    }

    #[tokio::test]
    async fn test_publish_creates_broadcast_notification() {
        let store = MemoryStore::new();
        store.publish_update(&update("First")).await.unwrap();
        store.publish_update(&update("Second")).await.unwrap();

        let updates = store.list_updates().await.unwrap();
        assert_eq!(updates[0].title, "Second");

        let notifications = store.list_notifications("u1").await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].title, "New update: Second");
        assert!(notifications.iter().all(|n| n.user_id.is_none() && !n.is_read));
    }

    #[tokio::test]
    async fn test_mark_read_and_mark_all_read() {
        let store = MemoryStore::new();
        store.publish_update(&update("A")).await.unwrap();
        store.publish_update(&update("B")).await.unwrap();

        let first = store.list_notifications("u1").await.unwrap()[0].id;
        let marked = store.mark_read(first).await.unwrap().expect("exists");
        assert!(marked.is_read);
        assert!(store.mark_read(9999).await.unwrap().is_none());

        assert_eq!(store.mark_all_read("u1").await.unwrap(), 1);
        assert_eq!(store.mark_all_read("u1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_survives_reload() {
        let path = std::env::temp_dir().join(format!("career-store-{}.json", uuid::Uuid::new_v4()));

        let store = MemoryStore::load(&path).await.unwrap();
        store.publish_update(&update("Persisted")).await.unwrap();
        store.insert_result(new_result("u1", 80)).await.unwrap();
        drop(store);

        let reloaded = MemoryStore::load(&path).await.unwrap();
        assert_eq!(reloaded.list_updates().await.unwrap()[0].title, "Persisted");
        assert_eq!(reloaded.history("u1").await.unwrap().len(), 1);

        // Ids keep increasing after reload.
        let next = reloaded.publish_update(&update("Next")).await.unwrap();
        assert!(next.id > 3);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_state_unchanged() {
        let path = std::env::temp_dir()
            .join(format!("career-missing-{}", uuid::Uuid::new_v4()))
            .join("snap.json");
        let store = MemoryStore::load(&path).await.unwrap();

        assert!(store.publish_update(&update("Lost")).await.is_err());
        assert!(store.publish_update(&update("Lost")).await.is_err());
        assert!(store.list_updates().await.unwrap().is_empty());
        assert!(store.list_notifications("u1").await.unwrap().is_empty());

        assert!(store.insert_result(new_result("u1", 80)).await.is_err());
        assert!(store.history("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_keeps_notifications_unread() {
        let dir = std::env::temp_dir().join(format!("career-dir-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir(&dir).await.unwrap();
        let store = MemoryStore::load(dir.join("snap.json")).await.unwrap();
        store.publish_update(&update("A")).await.unwrap();
        let id = store.list_notifications("u1").await.unwrap()[0].id;

        tokio::fs::remove_dir_all(&dir).await.unwrap();

        assert!(store.mark_read(id).await.is_err());
        assert!(store.mark_all_read("u1").await.is_err());
        assert!(!store.list_notifications("u1").await.unwrap()[0].is_read);
    }
}
