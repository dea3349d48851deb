// src/services/notification_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{common::error::AppError, db::NotificationStore, models::notifications::Notification};

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    pub async fn list_for_user(&self, user_id: &str, unread_only: bool) -> Result<Vec<Notification>, AppError> {
        self.store.list_for_user(user_id, unread_only).await
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, AppError> {
        self.store
            .mark_read(id)
            .await?
            .ok_or(AppError::NotificationNotFound(id))
    }
}
