// src/handlers/visits.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::visits::{ScheduledVisit, Visit},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleVisitPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Padaria Central")]
    pub client_name: String,

    #[validate(range(min = 1, message = "must_be_positive"))]
    #[schema(example = 1)]
    pub salesperson_id: i32,

    pub sale_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RescheduleVisitPayload {
    #[schema(example = "2026-03-10T14:00:00Z")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListVisitsQuery {
    pub salesperson_id: Option<i32>,
}

// POST /api/visits/schedule
#[utoipa::path(
    post,
    path = "/api/visits/schedule",
    tag = "Visits",
    request_body = ScheduleVisitPayload,
    responses(
        (status = 201, description = "Visita agendada no primeiro dia com vaga", body = ScheduledVisit),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Sem vaga na janela ou venda já tem visita")
    )
)]
pub async fn schedule_visit(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ScheduleVisitPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let scheduled = app_state
        .visit_scheduler
        .schedule_visit(&payload.client_name, payload.salesperson_id, payload.sale_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(scheduled)))
}

// GET /api/visits
#[utoipa::path(
    get,
    path = "/api/visits",
    tag = "Visits",
    params(ListVisitsQuery),
    responses(
        (status = 200, description = "Visitas por data", body = Vec<Visit>)
    )
)]
pub async fn list_visits(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListVisitsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let visits = app_state
        .visit_scheduler
        .list_visits(query.salesperson_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(visits)))
}

// GET /api/visits/by-sale/{sale_id}
#[utoipa::path(
    get,
    path = "/api/visits/by-sale/{sale_id}",
    tag = "Visits",
    params(("sale_id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Visita da venda", body = Visit),
        (status = 404, description = "Venda sem visita")
    )
)]
pub async fn get_visit_by_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(sale_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let visit = app_state
        .visit_scheduler
        .find_by_sale_id(sale_id)
        .await
        .and_then(|found| found.ok_or(AppError::VisitNotFound(sale_id)))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(visit)))
}

// PATCH /api/visits/{id}
#[utoipa::path(
    patch,
    path = "/api/visits/{id}",
    tag = "Visits",
    request_body = RescheduleVisitPayload,
    params(("id" = Uuid, Path, description = "ID da visita")),
    responses(
        (status = 200, description = "Visita com a nova data", body = Visit),
        (status = 404, description = "Visita não encontrada")
    )
)]
pub async fn reschedule_visit(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<RescheduleVisitPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let visit = app_state
        .visit_scheduler
        .reschedule_visit(id, payload.date)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(visit)))
}
