// src/db/goals_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::goals::SalesGoal};

// Sem pool próprio: quem chama escolhe o executor (pool ou transação)
#[derive(Clone, Default)]
pub struct GoalRepository;

impl GoalRepository {
    pub fn new() -> Self {
        Self
    }

    // salesperson_id = None grava a meta geral
    pub async fn upsert_goal<'e, E>(
        &self,
        executor: E,
        salesperson_id: Option<i32>,
        target: Decimal,
    ) -> Result<SalesGoal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let goal = sqlx::query_as::<_, SalesGoal>(
            r#"
            INSERT INTO sales_goals (id, salesperson_id, target)
            VALUES ($1, $2, $3)
            ON CONFLICT ((COALESCE(salesperson_id, 0))) DO UPDATE
            SET target = EXCLUDED.target, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(salesperson_id)
        .bind(target)
        .fetch_one(executor)
        .await?;

        Ok(goal)
    }

    // Meta geral primeiro, depois por vendedor
    pub async fn list_goals<'e, E>(&self, executor: E) -> Result<Vec<SalesGoal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let goals = sqlx::query_as::<_, SalesGoal>(
            "SELECT * FROM sales_goals ORDER BY salesperson_id ASC NULLS FIRST",
        )
        .fetch_all(executor)
        .await?;

        Ok(goals)
    }

    /// Receita realizada (fechamento + acompanhamento) por vendedor.
    pub async fn realized_by_salesperson<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<(i32, Decimal)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT salesperson_id, COALESCE(SUM(value), 0)
            FROM sales
            WHERE stage IN ('closing', 'follow_up')
            GROUP BY salesperson_id
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}
