// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::{DashboardSummary, RankingEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Sem filtro = equipe inteira
    pub salesperson_id: Option<i32>,
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Totais do funil", body = DashboardSummary)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary(&app_state.db_pool, query.salesperson_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/ranking
#[utoipa::path(
    get,
    path = "/api/ranking",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Vendedores por valor total vendido", body = Vec<RankingEntry>)
    )
)]
pub async fn get_ranking(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let ranking = app_state
        .dashboard_service
        .get_ranking(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(ranking)))
}
