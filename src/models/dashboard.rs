// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Ranking da "Copa de Vendas": soma de todas as etapas
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    pub count: i64,
}

// Totais crus vindos do banco
#[derive(Debug, Clone, FromRow)]
pub struct SalesTotals {
    pub total_value: Decimal,
    pub realized_revenue: Decimal,
    pub total_count: i64,
    pub closed_count: i64,
}

// Cards do topo do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    #[schema(value_type = f64)]
    pub realized_revenue: Decimal,
    pub total_count: i64,
    pub closed_count: i64,
    /// Percentual de vendas em fechamento/acompanhamento
    #[schema(value_type = f64, example = 37.5)]
    pub conversion_rate: Decimal,
}
