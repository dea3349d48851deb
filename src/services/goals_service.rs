// src/services/goals_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::GoalRepository,
    models::goals::{GoalProgress, SalesGoal},
};

#[derive(Clone)]
pub struct GoalsService {
    repo: GoalRepository,
}

impl GoalsService {
    pub fn new(repo: GoalRepository) -> Self {
        Self { repo }
    }

    /// `salesperson_id = None` grava a meta geral.
    pub async fn set_goal<'e, E>(
        &self,
        executor: E,
        salesperson_id: Option<i32>,
        target: Decimal,
    ) -> Result<SalesGoal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if target.is_sign_negative() {
            return Err(AppError::InvalidInput("target must not be negative".to_string()));
        }
        if salesperson_id.is_some_and(|id| id <= 0) {
            return Err(AppError::InvalidInput(
                "salespersonId must be a positive integer".to_string(),
            ));
        }

        self.repo.upsert_goal(executor, salesperson_id, target).await
    }

    pub async fn list_progress<'e, E>(&self, executor: E) -> Result<Vec<GoalProgress>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Snapshot único para metas e receita
        let mut tx = executor.begin().await?;
        let goals = self.repo.list_goals(&mut *tx).await?;
        let realized = self.repo.realized_by_salesperson(&mut *tx).await?;
        tx.commit().await?;

        Ok(goal_progress(&goals, &realized))
    }
}

fn goal_progress(goals: &[SalesGoal], realized: &[(i32, Decimal)]) -> Vec<GoalProgress> {
    let by_salesperson: HashMap<i32, Decimal> = realized.iter().copied().collect();
    let team_total: Decimal = realized.iter().map(|(_, value)| *value).sum();

    goals
        .iter()
        .map(|goal| {
            let realized = match goal.salesperson_id {
                Some(id) => by_salesperson.get(&id).copied().unwrap_or(Decimal::ZERO),
                None => team_total,
            };
            let progress = if goal.target > Decimal::ZERO {
                (realized * Decimal::ONE_HUNDRED / goal.target).round_dp(1)
            } else {
                Decimal::ZERO
            };

            GoalProgress {
                salesperson_id: goal.salesperson_id,
                target: goal.target,
                realized,
                progress,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::db::testing::{isolated_pool, seed_owner, seed_sale};
    use crate::models::sales::SaleStage;

    fn goal(salesperson_id: Option<i32>, target: i64) -> SalesGoal {
        SalesGoal {
            id: Uuid::new_v4(),
            salesperson_id,
            target: Decimal::from(target),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn individual_goals_use_their_own_revenue() {
        let realized = [(1, Decimal::from(25_000)), (2, Decimal::from(10_000))];

        let progress = goal_progress(&[goal(Some(1), 50_000)], &realized);

        assert_eq!(progress[0].realized, Decimal::from(25_000));
        assert_eq!(progress[0].progress, Decimal::from(50));
    }

    #[test]
    fn general_goal_uses_team_revenue() {
        let realized = [(1, Decimal::from(25_000)), (2, Decimal::from(10_000))];

        let progress = goal_progress(&[goal(None, 140_000)], &realized);

        assert_eq!(progress[0].realized, Decimal::from(35_000));
        assert_eq!(progress[0].progress, Decimal::from(25));
    }

    #[test]
    fn salesperson_without_sales_and_zero_targets_report_zero() {
        let progress = goal_progress(&[goal(Some(9), 1_000), goal(Some(1), 0)], &[(1, Decimal::from(10))]);

        assert_eq!(progress[0].realized, Decimal::ZERO);
        assert_eq!(progress[0].progress, Decimal::ZERO);
        assert_eq!(progress[1].progress, Decimal::ZERO);
    }

    #[tokio::test]
    async fn goals_are_upserted_per_scope_and_report_progress() {
        let Some(pool) = isolated_pool().await else { return };
        let service = GoalsService::new(GoalRepository::new());
        let owner = seed_owner(&pool).await;
        seed_sale(&pool, owner, 1, Decimal::from(1_000), SaleStage::Closing).await;
        seed_sale(&pool, owner, 1, Decimal::from(700), SaleStage::Negotiation).await;
        seed_sale(&pool, owner, 2, Decimal::from(2_000), SaleStage::FollowUp).await;

        let first = service.set_goal(&pool, None, Decimal::from(1_000)).await.unwrap();
        let general = service.set_goal(&pool, None, Decimal::from(5_000)).await.unwrap();
        service.set_goal(&pool, Some(1), Decimal::from(4_000)).await.unwrap();

        // Mesma linha da meta geral, só o alvo mudou
        assert_eq!(general.id, first.id);
        assert_eq!(general.target, Decimal::from(5_000));

        let progress = service.list_progress(&pool).await.unwrap();
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].salesperson_id, None);
        assert_eq!(progress[0].realized, Decimal::from(3_000));
        assert_eq!(progress[0].progress, Decimal::from(60));
        assert_eq!(progress[1].salesperson_id, Some(1));
        assert_eq!(progress[1].realized, Decimal::from(1_000));
        assert_eq!(progress[1].progress, Decimal::from(25));
    }

    #[tokio::test]
    async fn negative_target_is_rejected_before_the_database() {
        // Pool que nunca conecta
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let service = GoalsService::new(GoalRepository::new());

        let err = service.set_goal(&pool, Some(1), Decimal::from(-1)).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
