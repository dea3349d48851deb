// src/db/stores.rs
//
// Contratos de persistência usados pelo agendador de visitas e pelo serviço de
// vendas. Cada um tem a implementação Postgres (repositórios) e uma em memória
// para os testes.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        notifications::Notification,
        sales::{Sale, SaleChanges, SaleTransition},
        visits::Visit,
    },
};

#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn insert(&self, sale: &Sale) -> Result<Sale, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError>;

    /// Mais recentes primeiro.
    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Sale>, AppError>;

    /// Aplica as mudanças e devolve a etapa anterior, lida na mesma operação.
    /// `None` se a venda não existe.
    async fn update(
        &self,
        id: Uuid,
        changes: &SaleChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<SaleTransition>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Visitas do vendedor cujo dia (UTC) é `day`.
    async fn count_by_day_and_salesperson(
        &self,
        day: NaiveDate,
        salesperson_id: i32,
    ) -> Result<i64, AppError>;

    async fn find_by_sale_id(&self, sale_id: Uuid) -> Result<Option<Visit>, AppError>;

    /// Insere a visita somente se o dia dela ainda tem menos de `capacity`
    /// visitas do mesmo vendedor. Contagem e inserção são atômicas.
    ///
    /// `Ok(None)` quando o dia já está lotado;
    /// `Err(VisitAlreadyScheduled)` se a venda já tem visita.
    async fn insert_within_capacity(
        &self,
        visit: &Visit,
        capacity: u32,
    ) -> Result<Option<Visit>, AppError>;

    /// Reagendamento manual, sem nenhuma regra de capacidade.
    async fn update_date(
        &self,
        visit_id: Uuid,
        new_date: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Visit>, AppError>;

    /// Ordenado por data, crescente.
    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Visit>, AppError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<Notification, AppError>;

    /// Mais recentes primeiro.
    async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError>;

    async fn mark_read(&self, id: Uuid) -> Result<Option<Notification>, AppError>;
}
