// src/db/visit_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::stores::VisitStore, models::visits::Visit};

// Primeira chave do pg_advisory_xact_lock(int, int); a segunda é o vendedor.
const VISIT_LOCK_CLASS: i32 = 0x5649_5354;

#[derive(Clone)]
pub struct VisitRepository {
    pool: PgPool,
}

impl VisitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_on_day<'e, E>(
        executor: E,
        day: NaiveDate,
        salesperson_id: i32,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM visits
            WHERE salesperson_id = $1
              AND (scheduled_at AT TIME ZONE 'UTC')::date = $2
            "#,
        )
        .bind(salesperson_id)
        .bind(day)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl VisitStore for VisitRepository {
    async fn count_by_day_and_salesperson(
        &self,
        day: NaiveDate,
        salesperson_id: i32,
    ) -> Result<i64, AppError> {
        Self::count_on_day(&self.pool, day, salesperson_id).await
    }

    async fn find_by_sale_id(&self, sale_id: Uuid) -> Result<Option<Visit>, AppError> {
        let visit = sqlx::query_as::<_, Visit>("SELECT * FROM visits WHERE sale_id = $1")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(visit)
    }

    async fn insert_within_capacity(
        &self,
        visit: &Visit,
        capacity: u32,
    ) -> Result<Option<Visit>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializa agendamentos do mesmo vendedor até o COMMIT
        sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
            .bind(VISIT_LOCK_CLASS)
            .bind(visit.salesperson_id)
            .execute(&mut *tx)
            .await?;

        let day = visit.scheduled_at.date_naive();
        let booked = Self::count_on_day(&mut *tx, day, visit.salesperson_id).await?;
        if booked >= i64::from(capacity) {
            tx.rollback().await?;
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO visits (
                id, scheduled_at, client_name, salesperson_id, sale_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(visit.id)
        .bind(visit.scheduled_at)
        .bind(&visit.client_name)
        .bind(visit.salesperson_id)
        .bind(visit.sale_id)
        .bind(visit.created_at)
        .bind(visit.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // visits_sale_id_key: outra chamada já agendou esta venda
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::VisitAlreadyScheduled(visit.sale_id);
                }
            }
            e.into()
        })?;

        tx.commit().await?;

        Ok(Some(created))
    }

    async fn update_date(
        &self,
        visit_id: Uuid,
        new_date: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Visit>, AppError> {
        let visit = sqlx::query_as::<_, Visit>(
            r#"
            UPDATE visits
            SET scheduled_at = $2, updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(visit_id)
        .bind(new_date)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(visit)
    }

    async fn list(&self, salesperson_id: Option<i32>) -> Result<Vec<Visit>, AppError> {
        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT * FROM visits
            WHERE ($1::int IS NULL OR salesperson_id = $1)
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(salesperson_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(visits)
    }
}
