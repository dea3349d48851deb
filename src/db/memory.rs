// src/db/memory.rs
//
// Stores em memória para testes. Cada um guarda tudo atrás de um único Mutex,
// o que torna contagem + inserção atômicas como no Postgres.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{NotificationStore, SaleStore, VisitStore},
    models::{
        notifications::Notification,
        sales::{Sale, SaleChanges, SaleTransition},
        visits::Visit,
    },
};

#[derive(Default)]
pub struct MemorySaleStore {
    sales: Mutex<Vec<Sale>>,
}

#[async_trait]
impl SaleStore for MemorySaleStore {
    async fn insert(&self, sale: &Sale) -> Result<Sale, AppError> {
        self.sales.lock().await.push(sale.clone());
        Ok(sale.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        Ok(self.sales.lock().await.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Sale>, AppError> {
        let mut sales: Vec<Sale> = self
            .sales
            .lock()
            .await
            .iter()
            .filter(|s| salesperson_id.is_none_or(|id| s.salesperson_id == id))
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sales)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &SaleChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<SaleTransition>, AppError> {
        let mut sales = self.sales.lock().await;
        let Some(sale) = sales.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        let previous_stage = sale.stage;
        if let Some(stage) = changes.stage {
            sale.stage = stage;
        }
        if let Some(value) = changes.value {
            sale.value = value;
        }
        sale.updated_at = updated_at;

        Ok(Some(SaleTransition { sale: sale.clone(), previous_stage }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut sales = self.sales.lock().await;
        let before = sales.len();
        sales.retain(|s| s.id != id);
        Ok(sales.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryVisitStore {
    visits: Mutex<Vec<Visit>>,
}

impl MemoryVisitStore {
    /// Insere direto, sem regra nenhuma (montagem de cenário).
    pub async fn seed(&self, visit: Visit) {
        self.visits.lock().await.push(visit);
    }

    pub async fn all(&self) -> Vec<Visit> {
        self.visits.lock().await.clone()
    }
}

fn count_on_day(visits: &[Visit], day: NaiveDate, salesperson_id: i32) -> i64 {
    visits
        .iter()
        .filter(|v| v.salesperson_id == salesperson_id && v.scheduled_at.date_naive() == day)
        .count() as i64
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn count_by_day_and_salesperson(
        &self,
        day: NaiveDate,
        salesperson_id: i32,
    ) -> Result<i64, AppError> {
        Ok(count_on_day(&self.visits.lock().await, day, salesperson_id))
    }

    async fn find_by_sale_id(&self, sale_id: Uuid) -> Result<Option<Visit>, AppError> {
        Ok(self.visits.lock().await.iter().find(|v| v.sale_id == sale_id).cloned())
    }

    async fn insert_within_capacity(
        &self,
        visit: &Visit,
        capacity: u32,
    ) -> Result<Option<Visit>, AppError> {
        let mut visits = self.visits.lock().await;
        if visits.iter().any(|v| v.sale_id == visit.sale_id) {
            return Err(AppError::VisitAlreadyScheduled(visit.sale_id));
        }
        let day = visit.scheduled_at.date_naive();
        if count_on_day(&visits, day, visit.salesperson_id) >= i64::from(capacity) {
            return Ok(None);
        }
        visits.push(visit.clone());
        Ok(Some(visit.clone()))
    }

    async fn update_date(
        &self,
        visit_id: Uuid,
        new_date: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Visit>, AppError> {
        let mut visits = self.visits.lock().await;
        Ok(visits.iter_mut().find(|v| v.id == visit_id).map(|v| {
            v.scheduled_at = new_date;
            v.updated_at = updated_at;
            v.clone()
        }))
    }

    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Visit>, AppError> {
        let mut visits: Vec<Visit> = self
            .visits
            .lock()
            .await
            .iter()
            .filter(|v| salesperson_id.is_none_or(|id| v.salesperson_id == id))
            .cloned()
            .collect();
        visits.sort_by_key(|v| v.scheduled_at);
        Ok(visits)
    }
}

#[derive(Default)]
pub struct MemoryNotificationStore {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn insert(&self, notification: &Notification) -> Result<Notification, AppError> {
        self.notifications.lock().await.push(notification.clone());
        Ok(notification.clone())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .lock()
            .await
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid) -> Result<Option<Notification>, AppError> {
        let mut notifications = self.notifications.lock().await;
        Ok(notifications.iter_mut().find(|n| n.id == id).map(|n| {
            n.read = true;
            n.clone()
        }))
    }
}

/// Store que sempre falha na escrita, para o caso "visita criada, aviso não".
#[derive(Default)]
pub struct FailingNotificationStore;

#[async_trait]
impl NotificationStore for FailingNotificationStore {
    async fn insert(&self, _notification: &Notification) -> Result<Notification, AppError> {
        Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))
    }

    async fn list_for_user(
        &self,
        _user_id: &str,
        _unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        Ok(Vec::new())
    }

    async fn mark_read(&self, _id: Uuid) -> Result<Option<Notification>, AppError> {
        Ok(None)
    }
}
