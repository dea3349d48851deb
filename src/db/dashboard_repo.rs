// src/db/dashboard_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::dashboard::{RankingEntry, SalesTotals},
};

// Sem pool próprio: quem chama escolhe o executor (pool ou transação)
#[derive(Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    // 1. Totais do painel (opcionalmente de um vendedor só)
    pub async fn get_totals<'e, E>(
        &self,
        executor: E,
        salesperson_id: Option<i32>,
    ) -> Result<SalesTotals, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totals = sqlx::query_as::<_, SalesTotals>(
            r#"
            SELECT
                COALESCE(SUM(value), 0) AS total_value,
                COALESCE(SUM(value) FILTER (WHERE stage IN ('closing', 'follow_up')), 0)
                    AS realized_revenue,
                COUNT(*) AS total_count,
                COUNT(*) FILTER (WHERE stage IN ('closing', 'follow_up')) AS closed_count
            FROM sales
            WHERE ($1::int IS NULL OR salesperson_id = $1)
            "#,
        )
        .bind(salesperson_id)
        .fetch_one(executor)
        .await?;

        Ok(totals)
    }

    // 2. Ranking: um GROUP BY sobre todas as vendas
    pub async fn get_ranking<'e, E>(&self, executor: E) -> Result<Vec<RankingEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ranking = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT
                salesperson_id AS id,
                COALESCE(SUM(value), 0) AS total_value,
                COUNT(*) AS count
            FROM sales
            GROUP BY salesperson_id
            ORDER BY total_value DESC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(ranking)
    }
}
