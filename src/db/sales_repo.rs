// src/db/sales_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::SaleStore,
    models::sales::{Sale, SaleChanges, SaleTransition},
};

// Repositório de vendas, responsável pela tabela 'sales'
#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleStore for SalesRepository {
    async fn insert(&self, sale: &Sale) -> Result<Sale, AppError> {
        let created = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                id, client_name, value, stage, salesperson_id,
                description, owner_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(sale.id)
        .bind(&sale.client_name)
        .bind(sale.value)
        .bind(sale.stage)
        .bind(sale.salesperson_id)
        .bind(sale.description.as_deref())
        .bind(sale.owner_id)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE ($1::int IS NULL OR salesperson_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(salesperson_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &SaleChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<SaleTransition>, AppError> {
        // O CTE trava a linha e guarda a etapa antiga; o UPDATE devolve as duas.
        // Duas escritas concorrentes na mesma venda ficam em fila, então só uma
        // delas enxerga a borda "entrou em acompanhamento".
        let transition = sqlx::query_as::<_, SaleTransition>(
            r#"
            WITH previous AS (
                SELECT id, stage FROM sales WHERE id = $1 FOR UPDATE
            )
            UPDATE sales s
            SET stage = COALESCE($2, s.stage),
                value = COALESCE($3, s.value),
                updated_at = $4
            FROM previous
            WHERE s.id = previous.id
            RETURNING s.*, previous.stage AS previous_stage
            "#,
        )
        .bind(id)
        .bind(changes.stage)
        .bind(changes.value)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transition)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
