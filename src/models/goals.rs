// src/models/goals.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Meta de receita. salesperson_id vazio = meta geral da equipe.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesGoal {
    pub id: Uuid,
    pub salesperson_id: Option<i32>,
    #[schema(value_type = f64, example = 50000.0)]
    pub target: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertGoalPayload {
    #[schema(value_type = f64, example = 50000.0)]
    pub target: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub salesperson_id: Option<i32>,
    #[schema(value_type = f64)]
    pub target: Decimal,
    #[schema(value_type = f64)]
    pub realized: Decimal,
    /// Percentual, uma casa decimal
    #[schema(value_type = f64, example = 42.5)]
    pub progress: Decimal,
}
