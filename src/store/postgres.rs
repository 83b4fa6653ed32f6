// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    LIST_LIMIT, NotificationStore, ResultStore, StoreError, UpdateStore, broadcast_for,
};
use crate::models::{
    exam_record::{ExamResult, NewExamResult},
    notification::Notification,
    update::{CreateUpdateRequest, Update},
};

const RESULT_COLUMNS: &str = "id, user_id, exam_id, subject, difficulty, score, correct, total, \
     passed, time_taken_minutes, suggestions, created_at";

const NOTIFICATION_COLUMNS: &str = "id, user_id, title, message, is_read, created_at";

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgStore {
    async fn insert_result(&self, result: NewExamResult) -> Result<ExamResult, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO exam_results
                (user_id, exam_id, subject, difficulty, score, correct, total,
                 passed, time_taken_minutes, suggestions)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RESULT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ExamResult>(&sql)
            .bind(result.user_id)
            .bind(result.exam_id)
            .bind(result.subject)
            .bind(result.difficulty)
            .bind(result.score)
            .bind(result.correct)
            .bind(result.total)
            .bind(result.passed)
            .bind(result.time_taken_minutes)
            .bind(result.suggestions)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ExamResult>, StoreError> {
        let sql = format!(
            r#"
            SELECT {RESULT_COLUMNS}
            FROM exam_results
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, ExamResult>(&sql)
            .bind(user_id)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[async_trait]
impl UpdateStore for PgStore {
    async fn list_updates(&self) -> Result<Vec<Update>, StoreError> {
        let rows = sqlx::query_as::<_, Update>(
            r#"
            SELECT id, title, content, author, category, created_at
            FROM updates
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn publish_update(&self, update: &CreateUpdateRequest) -> Result<Update, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, Update>(
            r#"
            INSERT INTO updates (title, content, author, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author, category, created_at
            "#,
        )
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.author)
        .bind(&update.category)
        .fetch_one(&mut *tx)
        .await?;

        let (title, message) = broadcast_for(update);
        sqlx::query("INSERT INTO notifications (user_id, title, message) VALUES (NULL, $1, $2)")
            .bind(title)
            .bind(message)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        let sql = format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE user_id = $1 OR user_id IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, Notification>(&sql)
            .bind(user_id)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn mark_read(&self, id: i64) -> Result<Option<Notification>, StoreError> {
        let sql = format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING {NOTIFICATION_COLUMNS}"
        );

        let row = sqlx::query_as::<_, Notification>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn mark_all_read(&self, user_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE (user_id = $1 OR user_id IS NULL) AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
