// src/handlers/goals.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::goals::{GoalProgress, SalesGoal, UpsertGoalPayload},
};

// GET /api/goals
#[utoipa::path(
    get,
    path = "/api/goals",
    tag = "Goals",
    responses(
        (status = 200, description = "Metas com receita realizada e progresso", body = Vec<GoalProgress>)
    )
)]
pub async fn list_goals(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let progress = app_state
        .goals_service
        .list_progress(&app_state.db_pool)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(progress)))
}

// PUT /api/goals/general
#[utoipa::path(
    put,
    path = "/api/goals/general",
    tag = "Goals",
    request_body = UpsertGoalPayload,
    responses(
        (status = 200, description = "Meta geral gravada", body = SalesGoal),
        (status = 400, description = "Meta negativa")
    )
)]
pub async fn set_general_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<UpsertGoalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = app_state
        .goals_service
        .set_goal(&app_state.db_pool, None, payload.target)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(goal)))
}

// PUT /api/goals/{salesperson_id}
#[utoipa::path(
    put,
    path = "/api/goals/{salesperson_id}",
    tag = "Goals",
    request_body = UpsertGoalPayload,
    params(("salesperson_id" = i32, Path, description = "salespersonId do vendedor")),
    responses(
        (status = 200, description = "Meta do vendedor gravada", body = SalesGoal),
        (status = 400, description = "Meta negativa ou vendedor inválido")
    )
)]
pub async fn set_salesperson_goal(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(salesperson_id): Path<i32>,
    Json(payload): Json<UpsertGoalPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let goal = app_state
        .goals_service
        .set_goal(&app_state.db_pool, Some(salesperson_id), payload.target)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(goal)))
}
