// src/db/notification_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError, db::stores::NotificationStore, models::notifications::Notification,
};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<Notification, AppError> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (id, kind, title, description, user_id, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(notification.id)
        .bind(notification.kind)
        .bind(&notification.title)
        .bind(&notification.description)
        .bind(&notification.user_id)
        .bind(notification.read)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND (NOT $2 OR read = FALSE)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid) -> Result<Option<Notification>, AppError> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }
}
