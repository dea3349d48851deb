// src/services/dashboard_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, RankingEntry, SalesTotals},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary<'e, E>(
        &self,
        executor: E,
        salesperson_id: Option<i32>,
    ) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let totals = self.repo.get_totals(executor, salesperson_id).await?;
        Ok(summarize(totals))
    }

    pub async fn get_ranking<'e, E>(&self, executor: E) -> Result<Vec<RankingEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_ranking(executor).await
    }
}

fn summarize(totals: SalesTotals) -> DashboardSummary {
    let conversion_rate = if totals.total_count > 0 {
        (Decimal::from(totals.closed_count) * Decimal::ONE_HUNDRED / Decimal::from(totals.total_count))
            .round_dp(1)
    } else {
        Decimal::ZERO
    };

    DashboardSummary {
        total_value: totals.total_value,
        realized_revenue: totals.realized_revenue,
        total_count: totals.total_count,
        closed_count: totals.closed_count,
        conversion_rate,
    }
}
